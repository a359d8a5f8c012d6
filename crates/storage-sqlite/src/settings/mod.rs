//! SQLite storage implementation for reminder settings.

mod model;
mod repository;

pub use model::ReminderSettingsDB;
pub use repository::ReminderSettingsRepository;
