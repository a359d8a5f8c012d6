use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use super::model::ReminderSettingsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::reminder_settings;
use billfold_core::constants::DEFAULT_PREFERRED_TIME;
use billfold_core::errors::Result;
use billfold_core::settings::{
    ReminderSettings, ReminderSettingsRepositoryTrait, ReminderSettingsUpdate,
};

pub struct ReminderSettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReminderSettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ReminderSettingsRepository { pool, writer }
    }
}

#[async_trait]
impl ReminderSettingsRepositoryTrait for ReminderSettingsRepository {
    fn get_by_user(&self, for_user_id: &str) -> Result<Option<ReminderSettings>> {
        let mut conn = get_connection(&self.pool)?;
        let settings_db = reminder_settings::table
            .filter(reminder_settings::user_id.eq(for_user_id))
            .first::<ReminderSettingsDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(settings_db.map(ReminderSettings::from))
    }

    async fn create_defaults(&self, for_user_id: &str) -> Result<ReminderSettings> {
        let row = ReminderSettingsDB {
            id: Uuid::new_v4().to_string(),
            user_id: for_user_id.to_string(),
            local_notifications: true,
            whatsapp_enabled: true,
            call_enabled: true,
            sms_enabled: false,
            days_before: 3,
            preferred_time: DEFAULT_PREFERRED_TIME.to_string(),
            created_at: Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn| {
                let result_db = diesel::insert_into(reminder_settings::table)
                    .values(&row)
                    .returning(ReminderSettingsDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ReminderSettings::from(result_db))
            })
            .await
    }

    async fn update(
        &self,
        for_user_id: &str,
        update: ReminderSettingsUpdate,
    ) -> Result<ReminderSettings> {
        let for_user_id = for_user_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut row = reminder_settings::table
                    .filter(reminder_settings::user_id.eq(&for_user_id))
                    .first::<ReminderSettingsDB>(conn)
                    .map_err(StorageError::from)?;

                if let Some(value) = update.local_notifications {
                    row.local_notifications = value;
                }
                if let Some(value) = update.whatsapp_enabled {
                    row.whatsapp_enabled = value;
                }
                if let Some(value) = update.call_enabled {
                    row.call_enabled = value;
                }
                if let Some(value) = update.sms_enabled {
                    row.sms_enabled = value;
                }
                if let Some(value) = update.days_before {
                    row.days_before = value;
                }
                if let Some(value) = update.preferred_time {
                    row.preferred_time = value;
                }

                diesel::update(reminder_settings::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(ReminderSettings::from(row))
            })
            .await
    }
}
