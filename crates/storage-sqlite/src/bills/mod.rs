//! SQLite storage implementation for bills and payments.

mod model;
mod repository;

pub use model::{BillDB, PaymentDB};
pub use repository::BillRepository;
