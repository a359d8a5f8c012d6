//! Loan domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Installment-schedule metadata attached 1:1 to a loan-category bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub id: String,
    pub bill_id: String,
    pub total_amount: Decimal,
    pub monthly_payment: Decimal,
    pub total_installments: i32,
    pub installments_paid: i32,
    pub interest_rate_percent: Decimal,
    pub is_active: bool,
}

impl LoanDetails {
    /// Outstanding balance after the installments paid so far.
    pub fn amount_remaining(&self) -> Decimal {
        self.total_amount - Decimal::from(self.installments_paid) * self.monthly_payment
    }

    pub fn is_fully_paid(&self) -> bool {
        self.installments_paid >= self.total_installments
    }
}

/// Input model for the loan sub-payload of a bill creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoanDetails {
    pub total_amount: Decimal,
    pub monthly_payment: Decimal,
    pub total_installments: i32,
    pub installments_paid: Option<i32>,
    pub interest_rate_percent: Option<Decimal>,
}

/// Loan joined with its owning bill, as returned by the loans listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub id: String,
    pub bill_id: String,
    pub bill_name: String,
    pub total_amount: Decimal,
    pub monthly_payment: Decimal,
    pub total_installments: i32,
    pub installments_paid: i32,
    pub interest_rate_percent: Decimal,
    pub amount_remaining: Decimal,
    pub is_active: bool,
}

impl LoanSummary {
    pub fn from_parts(bill_name: &str, loan: &LoanDetails) -> Self {
        Self {
            id: loan.id.clone(),
            bill_id: loan.bill_id.clone(),
            bill_name: bill_name.to_string(),
            total_amount: loan.total_amount,
            monthly_payment: loan.monthly_payment,
            total_installments: loan.total_installments,
            installments_paid: loan.installments_paid,
            interest_rate_percent: loan.interest_rate_percent,
            amount_remaining: loan.amount_remaining(),
            is_active: loan.is_active,
        }
    }
}
