use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::Result;
use crate::reminders::reminders_model::{
    AlertAttempt, BillSummary, ChannelOutcome, RecurrenceSweepReport, ReminderChannel,
    ReminderSweepReport,
};

/// Outbound text-message sender (WhatsApp). Implemented by the channels crate.
///
/// Implementations receive a raw stored phone number and are responsible for
/// canonicalizing it before hitting the provider.
#[async_trait]
pub trait MessageSenderTrait: Send + Sync {
    /// Send a message; returns the provider-side message id.
    async fn send(&self, phone_number: &str, message: &str) -> Result<String>;
}

/// Outbound voice-call sender. Implemented by the channels crate.
#[async_trait]
pub trait VoiceSenderTrait: Send + Sync {
    /// Place a call that reads the message; returns the provider-side call id.
    async fn place_call(&self, phone_number: &str, message: &str) -> Result<String>;
}

/// Natural-language reminder text generation.
///
/// Infallible by contract: implementations recover from upstream failure with
/// a deterministic templated message, so the sweep never sees a generation
/// error.
#[async_trait]
pub trait MessageGeneratorTrait: Send + Sync {
    async fn generate(&self, user_name: &str, bill: &BillSummary) -> String;
}

/// The reminder engine: the three sweeps plus the manual send paths.
#[async_trait]
pub trait ReminderServiceTrait: Send + Sync {
    /// Per-minute sweep: match users on their preferred time, match bills on
    /// the reminder window, generate and dispatch.
    async fn run_reminder_sweep(&self, now: NaiveDateTime) -> Result<ReminderSweepReport>;

    /// Daily sweep: materialize next-cycle instances for paid recurring bills.
    async fn run_recurrence_sweep(&self, today: NaiveDate) -> Result<RecurrenceSweepReport>;

    /// Daily sweep: urgent alerts for recently past-due unpaid bills.
    async fn run_overdue_sweep(&self, now: NaiveDateTime) -> Result<Vec<AlertAttempt>>;

    /// Generate and send a reminder for one bill through one channel,
    /// honoring the bill-level channel flag.
    async fn send_manual_reminder(
        &self,
        user_id: &str,
        bill_id: &str,
        channel: ReminderChannel,
    ) -> Result<ChannelOutcome>;

    /// Send a canned test message through one channel.
    async fn send_test_message(
        &self,
        user_id: &str,
        channel: ReminderChannel,
    ) -> Result<ChannelOutcome>;
}
