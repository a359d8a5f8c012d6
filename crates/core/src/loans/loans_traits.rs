use async_trait::async_trait;

use crate::errors::Result;
use crate::loans::loans_model::{LoanDetails, LoanSummary};

/// Repository trait for loan details.
#[async_trait]
pub trait LoanRepositoryTrait: Send + Sync {
    /// Active loans joined with their bills, for the given owner.
    fn list_active_by_user(&self, user_id: &str) -> Result<Vec<LoanSummary>>;

    /// Fetch a loan together with its owning bill's user id, for ownership
    /// checks.
    fn get_with_owner(&self, loan_id: &str) -> Result<(LoanDetails, String)>;

    /// Increment `installments_paid` by one; deactivates the loan in the same
    /// transaction when the final installment lands.
    async fn increment_installments_paid(&self, loan_id: &str) -> Result<LoanDetails>;
}

/// Service trait for loan operations.
#[async_trait]
pub trait LoanServiceTrait: Send + Sync {
    fn list_active_loans(&self, user_id: &str) -> Result<Vec<LoanSummary>>;

    /// Record one installment payment. Rejected once the loan is fully paid.
    async fn pay_installment(&self, user_id: &str, loan_id: &str) -> Result<LoanDetails>;
}
