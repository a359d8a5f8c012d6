//! Tests for bill domain models.

#[cfg(test)]
mod tests {
    use crate::bills::{BillFrequency, ReminderPreferences};

    // ==================== BillFrequency Tests ====================

    #[test]
    fn test_frequency_serialization() {
        assert_eq!(
            serde_json::to_string(&BillFrequency::OneTime).unwrap(),
            "\"one-time\""
        );
        assert_eq!(
            serde_json::to_string(&BillFrequency::Monthly).unwrap(),
            "\"monthly\""
        );
        assert_eq!(
            serde_json::to_string(&BillFrequency::Quarterly).unwrap(),
            "\"quarterly\""
        );
    }

    #[test]
    fn test_frequency_deserialization() {
        assert_eq!(
            serde_json::from_str::<BillFrequency>("\"weekly\"").unwrap(),
            BillFrequency::Weekly
        );
        assert_eq!(
            serde_json::from_str::<BillFrequency>("\"yearly\"").unwrap(),
            BillFrequency::Yearly
        );
    }

    #[test]
    fn test_frequency_parse_round_trip() {
        for freq in [
            BillFrequency::OneTime,
            BillFrequency::Weekly,
            BillFrequency::Monthly,
            BillFrequency::Quarterly,
            BillFrequency::Yearly,
        ] {
            assert_eq!(BillFrequency::parse(freq.as_str()), Some(freq));
        }
        assert_eq!(BillFrequency::parse("fortnightly"), None);
    }

    #[test]
    fn test_frequency_is_recurring() {
        assert!(!BillFrequency::OneTime.is_recurring());
        assert!(BillFrequency::Weekly.is_recurring());
        assert!(BillFrequency::Monthly.is_recurring());
        assert!(BillFrequency::Quarterly.is_recurring());
        assert!(BillFrequency::Yearly.is_recurring());
    }

    // ==================== ReminderPreferences Tests ====================

    #[test]
    fn test_reminder_preferences_defaults() {
        let prefs = ReminderPreferences::default();
        assert!(prefs.enable_whatsapp);
        assert!(!prefs.enable_call);
        assert!(!prefs.enable_sms);
        assert!(prefs.enable_local_notification);
    }
}
