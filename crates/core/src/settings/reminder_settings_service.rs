use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::reminder_settings_traits::{
    ReminderSettingsRepositoryTrait, ReminderSettingsServiceTrait,
};
use crate::errors::Result;
use crate::settings::settings_model::{ReminderSettings, ReminderSettingsUpdate};

/// Service for managing per-user reminder settings.
pub struct ReminderSettingsService {
    repository: Arc<dyn ReminderSettingsRepositoryTrait>,
}

impl ReminderSettingsService {
    pub fn new(repository: Arc<dyn ReminderSettingsRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ReminderSettingsServiceTrait for ReminderSettingsService {
    async fn get_or_create(&self, user_id: &str) -> Result<ReminderSettings> {
        if let Some(settings) = self.repository.get_by_user(user_id)? {
            return Ok(settings);
        }
        info!("No reminder settings for user {user_id}, creating defaults");
        self.repository.create_defaults(user_id).await
    }

    async fn update_settings(
        &self,
        user_id: &str,
        update: ReminderSettingsUpdate,
    ) -> Result<ReminderSettings> {
        // Settings may not exist yet if the user never opened the settings
        // screen; materialize the defaults row before applying the update.
        if self.repository.get_by_user(user_id)?.is_none() {
            self.repository.create_defaults(user_id).await?;
        }
        self.repository.update(user_id, update).await
    }
}
