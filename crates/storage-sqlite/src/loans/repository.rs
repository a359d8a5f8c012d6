use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::LoanDetailsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{bills, loan_details};
use billfold_core::errors::{Result, ValidationError};
use billfold_core::loans::{LoanDetails, LoanRepositoryTrait, LoanSummary};

pub struct LoanRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LoanRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LoanRepository { pool, writer }
    }
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    fn list_active_by_user(&self, user_id: &str) -> Result<Vec<LoanSummary>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = loan_details::table
            .inner_join(bills::table)
            .filter(bills::user_id.eq(user_id))
            .filter(loan_details::is_active.eq(true))
            .select((LoanDetailsDB::as_select(), bills::name))
            .load::<(LoanDetailsDB, String)>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(loan_db, bill_name)| {
                let loan = LoanDetails::try_from(loan_db)?;
                Ok(LoanSummary::from_parts(&bill_name, &loan))
            })
            .collect()
    }

    fn get_with_owner(&self, loan_id: &str) -> Result<(LoanDetails, String)> {
        let mut conn = get_connection(&self.pool)?;
        let (loan_db, owner_id) = loan_details::table
            .inner_join(bills::table)
            .filter(loan_details::id.eq(loan_id))
            .select((LoanDetailsDB::as_select(), bills::user_id))
            .first::<(LoanDetailsDB, String)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok((LoanDetails::try_from(loan_db)?, owner_id))
    }

    async fn increment_installments_paid(&self, loan_id: &str) -> Result<LoanDetails> {
        let loan_id = loan_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut row = loan_details::table
                    .find(&loan_id)
                    .first::<LoanDetailsDB>(conn)
                    .map_err(StorageError::from)?;

                // Re-checked inside the transaction so two concurrent payments
                // cannot overshoot the schedule.
                if row.installments_paid >= row.total_installments {
                    return Err(ValidationError::InvalidInput(
                        "Loan is already fully paid".to_string(),
                    )
                    .into());
                }

                row.installments_paid += 1;
                if row.installments_paid >= row.total_installments {
                    row.is_active = false;
                }

                diesel::update(loan_details::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                LoanDetails::try_from(row)
            })
            .await
    }
}
