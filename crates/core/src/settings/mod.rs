//! Reminder settings module - domain models, service, and traits.

mod reminder_settings_service;
mod reminder_settings_traits;
mod settings_model;

pub use reminder_settings_service::ReminderSettingsService;
pub use reminder_settings_traits::{
    ReminderSettingsRepositoryTrait, ReminderSettingsServiceTrait,
};
pub use settings_model::{ReminderSettings, ReminderSettingsUpdate};
