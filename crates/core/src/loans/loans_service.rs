use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::loans_model::{LoanDetails, LoanSummary};
use super::loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
use crate::errors::{DatabaseError, Result, ValidationError};

/// Service for managing loans.
pub struct LoanService {
    repository: Arc<dyn LoanRepositoryTrait>,
}

impl LoanService {
    pub fn new(repository: Arc<dyn LoanRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LoanServiceTrait for LoanService {
    fn list_active_loans(&self, user_id: &str) -> Result<Vec<LoanSummary>> {
        self.repository.list_active_by_user(user_id)
    }

    async fn pay_installment(&self, user_id: &str, loan_id: &str) -> Result<LoanDetails> {
        let (loan, owner_id) = self.repository.get_with_owner(loan_id)?;
        if owner_id != user_id {
            // Foreign loans are indistinguishable from missing ones.
            return Err(DatabaseError::NotFound(format!("Loan {loan_id} not found")).into());
        }
        if loan.is_fully_paid() {
            return Err(
                ValidationError::InvalidInput("Loan is already fully paid".to_string()).into(),
            );
        }

        let updated = self.repository.increment_installments_paid(loan_id).await?;
        info!(
            "Installment recorded for loan {}: {}/{} paid",
            loan_id, updated.installments_paid, updated.total_installments
        );
        Ok(updated)
    }
}
