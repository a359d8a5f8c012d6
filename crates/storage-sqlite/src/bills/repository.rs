use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::{BillDB, PaymentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::loans::LoanDetailsDB;
use crate::schema::{bills, loan_details, payments};
use billfold_core::bills::{Bill, BillRepositoryTrait, BillUpdate, NewBill, Payment};
use billfold_core::errors::Result;

const RECURRING_FREQUENCIES: [&str; 4] = ["weekly", "monthly", "quarterly", "yearly"];

pub struct BillRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BillRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BillRepository { pool, writer }
    }

    fn load_for_user(
        conn: &mut SqliteConnection,
        owner_id: &str,
        target_bill_id: &str,
    ) -> Result<BillDB> {
        bills::table
            .filter(bills::id.eq(target_bill_id))
            .filter(bills::user_id.eq(owner_id))
            .first::<BillDB>(conn)
            .map_err(|e| StorageError::from(e).into())
    }

    fn collect(rows: Vec<BillDB>) -> Result<Vec<Bill>> {
        rows.into_iter().map(Bill::try_from).collect()
    }
}

#[async_trait]
impl BillRepositoryTrait for BillRepository {
    fn get_for_user(&self, user_id: &str, bill_id: &str) -> Result<Bill> {
        let mut conn = get_connection(&self.pool)?;
        Bill::try_from(Self::load_for_user(&mut conn, user_id, bill_id)?)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Bill>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bills::table
            .filter(bills::user_id.eq(user_id))
            .order(bills::due_date.asc())
            .load::<BillDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::collect(rows)
    }

    fn list_unpaid_by_user(&self, user_id: &str) -> Result<Vec<Bill>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bills::table
            .filter(bills::user_id.eq(user_id))
            .filter(bills::is_paid.eq(false))
            .load::<BillDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::collect(rows)
    }

    fn list_paid_recurring(&self) -> Result<Vec<Bill>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bills::table
            .filter(bills::is_paid.eq(true))
            .filter(bills::frequency.eq_any(RECURRING_FREQUENCIES))
            .load::<BillDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::collect(rows)
    }

    fn list_unpaid_due_before(&self, cutoff: NaiveDateTime) -> Result<Vec<Bill>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = bills::table
            .filter(bills::is_paid.eq(false))
            .filter(bills::due_date.lt(cutoff))
            .load::<BillDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::collect(rows)
    }

    fn unpaid_duplicate_exists(
        &self,
        user_id: &str,
        name: &str,
        due_date: NaiveDateTime,
    ) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let exists = diesel::select(diesel::dsl::exists(
            bills::table
                .filter(bills::user_id.eq(user_id))
                .filter(bills::name.eq(name))
                .filter(bills::due_date.eq(due_date))
                .filter(bills::is_paid.eq(false)),
        ))
        .get_result::<bool>(&mut conn)
        .map_err(StorageError::from)?;
        Ok(exists)
    }

    async fn create(&self, user_id: &str, new_bill: NewBill) -> Result<Bill> {
        let row = BillDB::from_new(user_id, &new_bill);
        let loan_payload = new_bill.loan_details;
        self.writer
            .exec(move |conn| {
                let result_db = diesel::insert_into(bills::table)
                    .values(&row)
                    .returning(BillDB::as_returning())
                    .get_result::<BillDB>(conn)
                    .map_err(StorageError::from)?;

                if let Some(loan) = loan_payload {
                    let loan_row = LoanDetailsDB::from_new(&result_db.id, &loan);
                    diesel::insert_into(loan_details::table)
                        .values(&loan_row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                Bill::try_from(result_db)
            })
            .await
    }

    async fn update(&self, user_id: &str, bill_id: &str, update: BillUpdate) -> Result<Bill> {
        let user_id = user_id.to_string();
        let bill_id = bill_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut row = Self::load_for_user(conn, &user_id, &bill_id)?;

                if let Some(value) = update.account_name {
                    row.account_name = value;
                }
                if let Some(value) = update.name {
                    row.name = value;
                }
                if let Some(value) = update.amount {
                    row.amount = value.to_string();
                }
                if let Some(value) = update.due_date {
                    row.due_date = value;
                }
                if let Some(value) = update.category {
                    row.category = value;
                }
                if let Some(value) = update.frequency {
                    row.frequency = value.as_str().to_string();
                }
                if let Some(value) = update.notes {
                    row.notes = Some(value);
                }
                if let Some(prefs) = update.reminder_preferences {
                    if let Some(value) = prefs.enable_whatsapp {
                        row.enable_whatsapp = value;
                    }
                    if let Some(value) = prefs.enable_call {
                        row.enable_call = value;
                    }
                    if let Some(value) = prefs.enable_sms {
                        row.enable_sms = value;
                    }
                    if let Some(value) = prefs.enable_local_notification {
                        row.enable_local_notification = value;
                    }
                }

                diesel::update(bills::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Bill::try_from(row)
            })
            .await
    }

    async fn delete(&self, user_id: &str, bill_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let bill_id = bill_id.to_string();
        self.writer
            .exec(move |conn| {
                // Load first so a missing or foreign bill reports not-found
                // instead of silently deleting zero rows.
                let row = Self::load_for_user(conn, &user_id, &bill_id)?;
                diesel::delete(bills::table.find(&row.id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn mark_paid(&self, user_id: &str, bill_id: &str, method: &str) -> Result<Bill> {
        let user_id = user_id.to_string();
        let bill_id = bill_id.to_string();
        let method = method.to_string();
        self.writer
            .exec(move |conn| {
                let mut row = Self::load_for_user(conn, &user_id, &bill_id)?;
                if row.is_paid {
                    // Idempotent: leave the row alone, write no second payment.
                    return Bill::try_from(row);
                }

                row.is_paid = true;
                diesel::update(bills::table.find(&row.id))
                    .set(bills::is_paid.eq(true))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let payment_row = PaymentDB::for_bill(&row, &method);
                diesel::insert_into(payments::table)
                    .values(&payment_row)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Bill::try_from(row)
            })
            .await
    }

    fn list_payments(&self, user_id: &str, bill_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        // Ownership check before exposing the audit trail.
        Self::load_for_user(&mut conn, user_id, bill_id)?;
        let rows = payments::table
            .filter(payments::bill_id.eq(bill_id))
            .order(payments::payment_date.desc())
            .load::<PaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn set_last_reminder_sent_on(&self, bill_id: &str, on: NaiveDate) -> Result<()> {
        let bill_id = bill_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(bills::table.find(&bill_id))
                    .set(bills::last_reminder_sent_on.eq(Some(on)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
