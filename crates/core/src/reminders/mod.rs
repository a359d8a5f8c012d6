//! Reminder engine - window matching, channel fan-out, idempotency tracking,
//! recurrence generation, and the overdue sweep.

mod dispatch;
mod reminders_model;
mod reminders_service;
mod reminders_traits;
pub mod schedule;
pub mod tracker;

pub use dispatch::ChannelDispatcher;
pub use reminders_model::{
    AlertAttempt, BillSummary, ChannelOutcome, DispatchResult, RecurrenceSweepReport,
    ReminderChannel, ReminderSweepReport,
};
pub use reminders_service::ReminderService;
pub use reminders_traits::{
    MessageGeneratorTrait, MessageSenderTrait, ReminderServiceTrait, VoiceSenderTrait,
};
pub use schedule::ReminderWindowMode;
