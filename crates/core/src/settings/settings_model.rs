//! Reminder settings domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PREFERRED_TIME;

/// Per-user reminder preferences.
///
/// Created atomically alongside the user at registration (or lazily with
/// defaults on first read) and mutated only through explicit updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub id: String,
    pub user_id: String,
    pub local_notifications: bool,
    pub whatsapp_enabled: bool,
    pub call_enabled: bool,
    pub sms_enabled: bool,
    /// Informational unless the sweep runs in user-configured window mode.
    pub days_before: i32,
    /// "HH:MM" wall-clock time at which the reminder sweep evaluates this user.
    pub preferred_time: String,
    pub created_at: NaiveDateTime,
}

impl ReminderSettings {
    /// The preferred time with the empty-string case corrected to the default.
    pub fn effective_preferred_time(&self) -> &str {
        if self.preferred_time.trim().is_empty() {
            DEFAULT_PREFERRED_TIME
        } else {
            &self.preferred_time
        }
    }
}

/// Partial update payload for reminder settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsUpdate {
    pub local_notifications: Option<bool>,
    pub whatsapp_enabled: Option<bool>,
    pub call_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
    pub days_before: Option<i32>,
    pub preferred_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn settings(preferred_time: &str) -> ReminderSettings {
        ReminderSettings {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            local_notifications: true,
            whatsapp_enabled: true,
            call_enabled: true,
            sms_enabled: false,
            days_before: 3,
            preferred_time: preferred_time.to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_effective_preferred_time_set() {
        assert_eq!(settings("21:30").effective_preferred_time(), "21:30");
    }

    #[test]
    fn test_effective_preferred_time_empty_falls_back() {
        assert_eq!(settings("").effective_preferred_time(), "09:00");
        assert_eq!(settings("   ").effective_preferred_time(), "09:00");
    }
}
