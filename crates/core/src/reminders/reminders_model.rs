//! Reminder engine domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bills::Bill;

/// A delivery channel wired to an outbound sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
    Whatsapp,
    Call,
}

impl ReminderChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderChannel::Whatsapp => "whatsapp",
            ReminderChannel::Call => "call",
        }
    }
}

/// Result of one channel attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelOutcome {
    pub success: bool,
    /// Provider-side identifier (message SID, call id) on success.
    pub detail: Option<String>,
    pub error: Option<String>,
}

impl ChannelOutcome {
    pub fn sent(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: Some(detail.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: None,
            error: Some(error.into()),
        }
    }
}

/// Outcome of fanning one reminder out to the eligible channels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    /// True iff at least one channel attempt succeeded. The idempotency
    /// marker is only recorded when this is set.
    pub sent_any: bool,
    pub outcomes: Vec<(ReminderChannel, ChannelOutcome)>,
}

impl DispatchResult {
    pub fn outcome_for(&self, channel: ReminderChannel) -> Option<&ChannelOutcome> {
        self.outcomes
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, o)| o)
    }
}

/// The slice of a bill handed to the message generation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

impl From<&Bill> for BillSummary {
    fn from(bill: &Bill) -> Self {
        Self {
            name: bill.name.clone(),
            amount: bill.amount,
            due_date: bill.due_day(),
        }
    }
}

/// One overdue alert attempt raised by the overdue sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAttempt {
    pub bill_id: String,
    pub user_id: String,
    pub days_overdue: i64,
    pub outcome: ChannelOutcome,
}

/// Counters from one reminder sweep run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSweepReport {
    pub users_scanned: usize,
    pub users_matched: usize,
    pub bills_matched: usize,
    pub reminders_sent: usize,
}

/// Counters from one recurrence sweep run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceSweepReport {
    pub bills_examined: usize,
    pub instances_generated: usize,
}
