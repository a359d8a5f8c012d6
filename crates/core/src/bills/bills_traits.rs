use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::bills::bills_model::{Bill, BillUpdate, NewBill, Payment};
use crate::errors::Result;

/// Repository trait for bill storage.
///
/// Reads run against the pool; every mutating call executes inside a single
/// transaction on the writer, so multi-row operations (bill + loan, bill +
/// payment) are atomic.
#[async_trait]
pub trait BillRepositoryTrait: Send + Sync {
    /// Fetch a bill owned by the given user. Not-found covers both absence
    /// and foreign ownership.
    fn get_for_user(&self, user_id: &str, bill_id: &str) -> Result<Bill>;

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Bill>>;

    fn list_unpaid_by_user(&self, user_id: &str) -> Result<Vec<Bill>>;

    /// Paid bills with a recurring frequency - the recurrence sweep input set.
    fn list_paid_recurring(&self) -> Result<Vec<Bill>>;

    /// Unpaid bills whose due date is strictly before the cutoff - the
    /// overdue sweep input set.
    fn list_unpaid_due_before(&self, cutoff: NaiveDateTime) -> Result<Vec<Bill>>;

    /// Duplicate guard for the recurrence sweep: does an unpaid bill with the
    /// same owner, name and due date already exist?
    fn unpaid_duplicate_exists(
        &self,
        user_id: &str,
        name: &str,
        due_date: NaiveDateTime,
    ) -> Result<bool>;

    /// Insert a bill, plus its loan details row when present, atomically.
    async fn create(&self, user_id: &str, new_bill: NewBill) -> Result<Bill>;

    async fn update(&self, user_id: &str, bill_id: &str, update: BillUpdate) -> Result<Bill>;

    async fn delete(&self, user_id: &str, bill_id: &str) -> Result<()>;

    /// Flip `is_paid` and write the payment audit record in one transaction.
    /// A bill that is already paid is left untouched and no payment row is
    /// created.
    async fn mark_paid(&self, user_id: &str, bill_id: &str, method: &str) -> Result<Bill>;

    fn list_payments(&self, user_id: &str, bill_id: &str) -> Result<Vec<Payment>>;

    /// Record the reminder idempotency marker. Best-effort at the call site;
    /// the repository itself reports failures normally.
    async fn set_last_reminder_sent_on(&self, bill_id: &str, on: NaiveDate) -> Result<()>;
}

/// Service trait for bill operations exposed to the API layer.
#[async_trait]
pub trait BillServiceTrait: Send + Sync {
    fn get_bill(&self, user_id: &str, bill_id: &str) -> Result<Bill>;

    fn list_bills(&self, user_id: &str) -> Result<Vec<Bill>>;

    async fn create_bill(&self, user_id: &str, new_bill: NewBill) -> Result<Bill>;

    async fn update_bill(&self, user_id: &str, bill_id: &str, update: BillUpdate) -> Result<Bill>;

    async fn delete_bill(&self, user_id: &str, bill_id: &str) -> Result<()>;

    /// Mark a bill paid, creating the payment record. Idempotent: an
    /// already-paid bill logs a warning and is returned unchanged.
    async fn mark_paid(&self, user_id: &str, bill_id: &str) -> Result<Bill>;
}
