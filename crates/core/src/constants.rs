//! Application-wide constants.

/// Default preferred reminder time, applied whenever a user's stored value is
/// empty at scan time.
pub const DEFAULT_PREFERRED_TIME: &str = "09:00";

/// Notes text written onto bill instances materialized by the recurrence sweep.
pub const RECURRING_NOTES_MARKER: &str = "Auto-generated from recurring bill";

/// Reserved category for bills that carry loan installment details.
pub const LOAN_CATEGORY: &str = "loan";

/// Overdue alerts are only raised for bills at most this many days past due.
pub const OVERDUE_ALERT_MAX_DAYS: i64 = 7;

/// Currency symbol used in rendered reminder and alert text.
pub const CURRENCY_SYMBOL: &str = "₹";
