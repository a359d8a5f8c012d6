//! Loans module - domain models, service, and traits.

mod loans_model;
mod loans_service;
mod loans_traits;

pub use loans_model::{LoanDetails, LoanSummary, NewLoanDetails};
pub use loans_service::LoanService;
pub use loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
