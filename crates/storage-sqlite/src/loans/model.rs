//! Database models for loan details.

use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::bills::BillDB;
use billfold_core::errors::Error;
use billfold_core::loans::{LoanDetails, NewLoanDetails};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Associations, Debug, Clone,
)]
#[diesel(belongs_to(BillDB, foreign_key = bill_id))]
#[diesel(table_name = crate::schema::loan_details)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LoanDetailsDB {
    pub id: String,
    pub bill_id: String,
    pub total_amount: String,
    pub monthly_payment: String,
    pub total_installments: i32,
    pub installments_paid: i32,
    pub interest_rate_percent: String,
    pub is_active: bool,
}

impl LoanDetailsDB {
    /// Build an insertable row from the loan sub-payload of a bill creation.
    pub fn from_new(owner_bill_id: &str, new_loan: &NewLoanDetails) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            bill_id: owner_bill_id.to_string(),
            total_amount: new_loan.total_amount.to_string(),
            monthly_payment: new_loan.monthly_payment.to_string(),
            total_installments: new_loan.total_installments,
            installments_paid: new_loan.installments_paid.unwrap_or(0),
            interest_rate_percent: new_loan
                .interest_rate_percent
                .unwrap_or_default()
                .to_string(),
            is_active: true,
        }
    }
}

impl TryFrom<LoanDetailsDB> for LoanDetails {
    type Error = Error;

    fn try_from(db: LoanDetailsDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            bill_id: db.bill_id,
            total_amount: db.total_amount.parse::<Decimal>()?,
            monthly_payment: db.monthly_payment.parse::<Decimal>()?,
            total_installments: db.total_installments,
            installments_paid: db.installments_paid,
            interest_rate_percent: db.interest_rate_percent.parse::<Decimal>()?,
            is_active: db.is_active,
        })
    }
}
