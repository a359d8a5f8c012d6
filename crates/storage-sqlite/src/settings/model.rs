//! Database models for reminder settings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::users::UserDB;
use billfold_core::settings::ReminderSettings;

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Associations, Debug, Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::reminder_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReminderSettingsDB {
    pub id: String,
    pub user_id: String,
    pub local_notifications: bool,
    pub whatsapp_enabled: bool,
    pub call_enabled: bool,
    pub sms_enabled: bool,
    pub days_before: i32,
    pub preferred_time: String,
    pub created_at: NaiveDateTime,
}

impl From<ReminderSettingsDB> for ReminderSettings {
    fn from(db: ReminderSettingsDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            local_notifications: db.local_notifications,
            whatsapp_enabled: db.whatsapp_enabled,
            call_enabled: db.call_enabled,
            sms_enabled: db.sms_enabled,
            days_before: db.days_before,
            preferred_time: db.preferred_time,
            created_at: db.created_at,
        }
    }
}
