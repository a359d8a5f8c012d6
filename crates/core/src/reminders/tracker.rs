//! Reminder idempotency tracking.
//!
//! The marker lives in the dedicated `last_reminder_sent_on` column. Rows
//! written by the previous system carried it as JSON embedded in the
//! free-text notes field (`{"last_reminder_date": "YYYY-MM-DD"}`, with any
//! pre-existing note preserved under `"original_notes"`); the read path still
//! understands that payload so migrated rows keep their history. All parsing
//! is defensive - malformed data reads as "never sent", not as an error.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error};
use serde_json::Value;

use crate::bills::{Bill, BillRepositoryTrait};

/// Key of the marker inside a legacy notes payload.
const LEGACY_MARKER_KEY: &str = "last_reminder_date";

/// Key under which the previous system stashed pre-existing free text.
const LEGACY_ORIGINAL_NOTES_KEY: &str = "original_notes";

/// The date the last reminder was dispatched for this bill, if any.
pub fn last_reminder_sent_on(bill: &Bill) -> Option<NaiveDate> {
    bill.last_reminder_sent_on
        .or_else(|| parse_legacy_marker(bill.notes.as_deref()))
}

/// The user's own note text, unwrapping a legacy JSON payload when present.
pub fn display_notes(bill: &Bill) -> Option<String> {
    let notes = bill.notes.as_deref()?;
    match serde_json::from_str::<Value>(notes) {
        Ok(Value::Object(map)) if map.contains_key(LEGACY_MARKER_KEY) => map
            .get(LEGACY_ORIGINAL_NOTES_KEY)
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => Some(notes.to_string()),
    }
}

fn parse_legacy_marker(notes: Option<&str>) -> Option<NaiveDate> {
    let notes = notes?;
    if notes.is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(notes).ok()?;
    let raw = value.get(LEGACY_MARKER_KEY)?.as_str()?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Persist the marker for a dispatched reminder. Best-effort: a write failure
/// is logged and swallowed, so a reminder can go out without its marker
/// sticking. Free-text notes are never touched.
pub async fn mark_sent(repository: &Arc<dyn BillRepositoryTrait>, bill: &Bill, on: NaiveDate) {
    match repository.set_last_reminder_sent_on(&bill.id, on).await {
        Ok(()) => debug!("Recorded reminder marker for bill {} on {}", bill.id, on),
        Err(e) => error!(
            "Failed to record reminder marker for bill {}: {}",
            bill.id, e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bills::{BillFrequency, ReminderPreferences};
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn bill(notes: Option<&str>, column: Option<NaiveDate>) -> Bill {
        Bill {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            account_name: "HDFC".to_string(),
            name: "Electricity".to_string(),
            amount: dec!(1200),
            due_date: NaiveDateTime::parse_from_str("2025-03-10 00:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            category: "utilities".to_string(),
            frequency: BillFrequency::Monthly,
            is_paid: false,
            notes: notes.map(str::to_string),
            last_reminder_sent_on: column,
            reminder_preferences: ReminderPreferences::default(),
            created_at: NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== Read Path Tests ====================

    #[test]
    fn test_column_takes_precedence() {
        let b = bill(
            Some(r#"{"last_reminder_date": "2025-03-01"}"#),
            Some(date(2025, 3, 7)),
        );
        assert_eq!(last_reminder_sent_on(&b), Some(date(2025, 3, 7)));
    }

    #[test]
    fn test_legacy_json_notes_readable() {
        let b = bill(Some(r#"{"last_reminder_date": "2025-03-07"}"#), None);
        assert_eq!(last_reminder_sent_on(&b), Some(date(2025, 3, 7)));
    }

    #[test]
    fn test_legacy_json_with_original_notes() {
        let b = bill(
            Some(r#"{"last_reminder_date": "2025-03-07", "original_notes": "pay via netbanking"}"#),
            None,
        );
        assert_eq!(last_reminder_sent_on(&b), Some(date(2025, 3, 7)));
        assert_eq!(display_notes(&b), Some("pay via netbanking".to_string()));
    }

    #[test]
    fn test_plain_notes_yield_none() {
        let b = bill(Some("pay before the 10th"), None);
        assert_eq!(last_reminder_sent_on(&b), None);
        assert_eq!(display_notes(&b), Some("pay before the 10th".to_string()));
    }

    #[test]
    fn test_malformed_data_yields_none() {
        assert_eq!(last_reminder_sent_on(&bill(Some("{not json"), None)), None);
        assert_eq!(
            last_reminder_sent_on(&bill(Some(r#"{"last_reminder_date": "soon"}"#), None)),
            None
        );
        assert_eq!(last_reminder_sent_on(&bill(Some(""), None)), None);
        assert_eq!(last_reminder_sent_on(&bill(None, None)), None);
    }
}
