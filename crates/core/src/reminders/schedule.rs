//! Time-window matching and recurrence date arithmetic.
//!
//! Pure functions, no I/O. The sweep recomputes `days_left` fresh on every
//! run; nothing here consults reminder history.

use chrono::{Duration, Months, NaiveDate};

use crate::bills::BillFrequency;

/// Upper bound of the fixed reminder window (inclusive), in days before due.
const FIXED_WINDOW_DAYS: i64 = 3;

/// How the reminder window is determined for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderWindowMode {
    /// Remind on the 3rd, 2nd and 1st day before the due date, and on the due
    /// date itself. This is the default and matches historical behavior.
    #[default]
    Fixed,
    /// Honor the user's `days_before` setting: remind on every day from
    /// `days_before` days out through the due date.
    UserConfigured,
}

/// Whether a reminder is due today under the fixed window policy.
///
/// Overdue bills (negative days left) are never matched here; they belong to
/// the overdue sweep.
pub fn is_reminder_due(today: NaiveDate, due_date: NaiveDate) -> bool {
    is_reminder_due_within(today, due_date, FIXED_WINDOW_DAYS)
}

/// Whether a reminder is due today for a window of `days_before` days.
pub fn is_reminder_due_within(today: NaiveDate, due_date: NaiveDate, days_before: i64) -> bool {
    let days_left = (due_date - today).num_days();
    (0..=days_before).contains(&days_left)
}

/// The next cycle's due date for a recurring bill.
///
/// Month and year steps use calendar-aware arithmetic: the day-of-month is
/// clamped to the target month's last valid day (Jan 31 + 1 month lands on
/// Feb 29 in a leap year). Returns `None` for one-time bills.
pub fn next_due_date(due_date: NaiveDate, frequency: BillFrequency) -> Option<NaiveDate> {
    match frequency {
        BillFrequency::OneTime => None,
        BillFrequency::Weekly => Some(due_date + Duration::weeks(1)),
        BillFrequency::Monthly => due_date.checked_add_months(Months::new(1)),
        BillFrequency::Quarterly => due_date.checked_add_months(Months::new(3)),
        BillFrequency::Yearly => due_date.checked_add_months(Months::new(12)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== Window Matching Tests ====================

    #[test]
    fn test_window_matches_zero_through_three_days() {
        let due = date(2025, 3, 10);
        assert!(is_reminder_due(date(2025, 3, 7), due));
        assert!(is_reminder_due(date(2025, 3, 8), due));
        assert!(is_reminder_due(date(2025, 3, 9), due));
        assert!(is_reminder_due(date(2025, 3, 10), due));
    }

    #[test]
    fn test_window_rejects_far_future() {
        let due = date(2025, 3, 10);
        assert!(!is_reminder_due(date(2025, 3, 6), due));
        assert!(!is_reminder_due(date(2025, 1, 1), due));
    }

    #[test]
    fn test_window_never_matches_overdue() {
        let due = date(2025, 3, 10);
        assert!(!is_reminder_due(date(2025, 3, 11), due));
        assert!(!is_reminder_due(date(2025, 4, 10), due));
    }

    #[test]
    fn test_configurable_window() {
        let due = date(2025, 3, 10);
        assert!(is_reminder_due_within(date(2025, 3, 3), due, 7));
        assert!(!is_reminder_due_within(date(2025, 3, 2), due, 7));
        assert!(is_reminder_due_within(date(2025, 3, 10), due, 0));
        assert!(!is_reminder_due_within(date(2025, 3, 9), due, 0));
    }

    // ==================== Recurrence Arithmetic Tests ====================

    #[test]
    fn test_monthly_advance_clamps_month_end() {
        assert_eq!(
            next_due_date(date(2024, 1, 31), BillFrequency::Monthly),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            next_due_date(date(2025, 1, 31), BillFrequency::Monthly),
            Some(date(2025, 2, 28))
        );
        assert_eq!(
            next_due_date(date(2025, 3, 31), BillFrequency::Monthly),
            Some(date(2025, 4, 30))
        );
    }

    #[test]
    fn test_monthly_advance_plain_day() {
        assert_eq!(
            next_due_date(date(2025, 1, 15), BillFrequency::Monthly),
            Some(date(2025, 2, 15))
        );
    }

    #[test]
    fn test_weekly_advance() {
        assert_eq!(
            next_due_date(date(2025, 2, 26), BillFrequency::Weekly),
            Some(date(2025, 3, 5))
        );
    }

    #[test]
    fn test_quarterly_advance_clamps() {
        assert_eq!(
            next_due_date(date(2024, 11, 30), BillFrequency::Quarterly),
            Some(date(2025, 2, 28))
        );
    }

    #[test]
    fn test_yearly_advance_leap_day() {
        assert_eq!(
            next_due_date(date(2024, 2, 29), BillFrequency::Yearly),
            Some(date(2025, 2, 28))
        );
    }

    #[test]
    fn test_one_time_never_advances() {
        assert_eq!(next_due_date(date(2025, 5, 1), BillFrequency::OneTime), None);
    }
}
