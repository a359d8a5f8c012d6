//! Bills module - domain models, service, and traits.

mod bills_model;
mod bills_model_tests;
mod bills_service;
mod bills_traits;

pub use bills_model::{
    Bill, BillFrequency, BillUpdate, NewBill, Payment, ReminderPreferences,
    ReminderPreferencesUpdate,
};
pub use bills_service::BillService;
pub use bills_traits::{BillRepositoryTrait, BillServiceTrait};
