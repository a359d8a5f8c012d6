use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::bills_model::{Bill, BillUpdate, NewBill};
use super::bills_traits::{BillRepositoryTrait, BillServiceTrait};
use crate::constants::LOAN_CATEGORY;
use crate::errors::{Result, ValidationError};
use crate::reminders::tracker;

/// Strip any legacy marker payload out of the notes before a bill leaves the
/// service, so clients only ever see the user's own text.
fn presentable(mut bill: Bill) -> Bill {
    bill.notes = tracker::display_notes(&bill);
    bill
}

/// Payment method recorded for manual mark-paid operations.
const MANUAL_PAYMENT_METHOD: &str = "manual";

/// Service for managing bills.
pub struct BillService {
    repository: Arc<dyn BillRepositoryTrait>,
}

impl BillService {
    pub fn new(repository: Arc<dyn BillRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validate_new_bill(new_bill: &NewBill) -> Result<()> {
        if new_bill.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if new_bill.account_name.trim().is_empty() {
            return Err(ValidationError::MissingField("account_name".to_string()).into());
        }
        if new_bill.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "amount must be greater than zero".to_string(),
            )
            .into());
        }

        let is_loan = new_bill.category.as_deref() == Some(LOAN_CATEGORY);
        match (&new_bill.loan_details, is_loan) {
            (None, true) => Err(ValidationError::MissingField("loan_details".to_string()).into()),
            (Some(_), false) => Err(ValidationError::InvalidInput(
                "loan_details is only accepted for loan-category bills".to_string(),
            )
            .into()),
            (Some(loan), true) => {
                if loan.total_installments <= 0 {
                    return Err(ValidationError::InvalidInput(
                        "total_installments must be greater than zero".to_string(),
                    )
                    .into());
                }
                if loan.total_amount <= Decimal::ZERO || loan.monthly_payment <= Decimal::ZERO {
                    return Err(ValidationError::InvalidInput(
                        "loan amounts must be greater than zero".to_string(),
                    )
                    .into());
                }
                Ok(())
            }
            (None, false) => Ok(()),
        }
    }
}

#[async_trait]
impl BillServiceTrait for BillService {
    fn get_bill(&self, user_id: &str, bill_id: &str) -> Result<Bill> {
        self.repository
            .get_for_user(user_id, bill_id)
            .map(presentable)
    }

    fn list_bills(&self, user_id: &str) -> Result<Vec<Bill>> {
        Ok(self
            .repository
            .list_by_user(user_id)?
            .into_iter()
            .map(presentable)
            .collect())
    }

    async fn create_bill(&self, user_id: &str, new_bill: NewBill) -> Result<Bill> {
        Self::validate_new_bill(&new_bill)?;
        debug!(
            "Creating bill '{}' for user {} (category: {:?})",
            new_bill.name, user_id, new_bill.category
        );
        let bill = self.repository.create(user_id, new_bill).await?;
        info!("Created bill {} for user {}", bill.id, user_id);
        Ok(bill)
    }

    async fn update_bill(&self, user_id: &str, bill_id: &str, update: BillUpdate) -> Result<Bill> {
        self.repository.update(user_id, bill_id, update).await
    }

    async fn delete_bill(&self, user_id: &str, bill_id: &str) -> Result<()> {
        let bill = self.repository.get_for_user(user_id, bill_id)?;
        info!("Deleting bill {} ('{}')", bill.id, bill.name);
        self.repository.delete(user_id, bill_id).await
    }

    async fn mark_paid(&self, user_id: &str, bill_id: &str) -> Result<Bill> {
        let bill = self.repository.get_for_user(user_id, bill_id)?;
        if bill.is_paid {
            warn!("Bill {} is already marked as paid", bill_id);
            return Ok(bill);
        }
        self.repository
            .mark_paid(user_id, bill_id, MANUAL_PAYMENT_METHOD)
            .await
    }
}
