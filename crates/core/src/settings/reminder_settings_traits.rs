use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::settings_model::{ReminderSettings, ReminderSettingsUpdate};

/// Repository trait for reminder settings.
#[async_trait]
pub trait ReminderSettingsRepositoryTrait: Send + Sync {
    fn get_by_user(&self, user_id: &str) -> Result<Option<ReminderSettings>>;

    /// Insert a defaults row for the user and return it.
    async fn create_defaults(&self, user_id: &str) -> Result<ReminderSettings>;

    async fn update(
        &self,
        user_id: &str,
        update: ReminderSettingsUpdate,
    ) -> Result<ReminderSettings>;
}

/// Service trait for reminder settings.
#[async_trait]
pub trait ReminderSettingsServiceTrait: Send + Sync {
    /// Fetch the user's settings, creating the defaults row if none exists.
    async fn get_or_create(&self, user_id: &str) -> Result<ReminderSettings>;

    async fn update_settings(
        &self,
        user_id: &str,
        update: ReminderSettingsUpdate,
    ) -> Result<ReminderSettings>;
}
