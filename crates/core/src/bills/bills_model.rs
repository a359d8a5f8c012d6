//! Bill and payment domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::LOAN_CATEGORY;
use crate::loans::NewLoanDetails;

/// How often a bill recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BillFrequency {
    OneTime,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillFrequency::OneTime => "one-time",
            BillFrequency::Weekly => "weekly",
            BillFrequency::Monthly => "monthly",
            BillFrequency::Quarterly => "quarterly",
            BillFrequency::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "one-time" => Some(BillFrequency::OneTime),
            "weekly" => Some(BillFrequency::Weekly),
            "monthly" => Some(BillFrequency::Monthly),
            "quarterly" => Some(BillFrequency::Quarterly),
            "yearly" => Some(BillFrequency::Yearly),
            _ => None,
        }
    }

    /// Whether the recurrence sweep regenerates instances of this frequency.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, BillFrequency::OneTime)
    }
}

impl Default for BillFrequency {
    fn default() -> Self {
        BillFrequency::Monthly
    }
}

/// Per-bill channel enablement flags.
///
/// Only the WhatsApp and call channels are wired to senders; the sms and
/// local-notification flags are stored for the mobile client but never
/// dispatched by the sweeps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPreferences {
    pub enable_whatsapp: bool,
    pub enable_call: bool,
    pub enable_sms: bool,
    pub enable_local_notification: bool,
}

impl Default for ReminderPreferences {
    fn default() -> Self {
        Self {
            enable_whatsapp: true,
            enable_call: false,
            enable_sms: false,
            enable_local_notification: true,
        }
    }
}

/// Partial update for per-bill channel flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPreferencesUpdate {
    pub enable_whatsapp: Option<bool>,
    pub enable_call: Option<bool>,
    pub enable_sms: Option<bool>,
    pub enable_local_notification: Option<bool>,
}

/// Domain model representing a payable obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub user_id: String,
    pub account_name: String,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDateTime,
    pub category: String,
    pub frequency: BillFrequency,
    pub is_paid: bool,
    /// Free text owned by the user. Rows written by the previous system may
    /// carry a JSON payload here; see `reminders::tracker`.
    pub notes: Option<String>,
    /// Date of the most recent successfully dispatched reminder.
    pub last_reminder_sent_on: Option<NaiveDate>,
    pub reminder_preferences: ReminderPreferences,
    pub created_at: NaiveDateTime,
}

impl Bill {
    /// Calendar date of the due timestamp.
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date()
    }

    pub fn is_loan(&self) -> bool {
        self.category == LOAN_CATEGORY
    }
}

/// Input model for creating a new bill.
///
/// When `category` is `"loan"`, `loan_details` is mandatory and both rows are
/// written in a single transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub account_name: String,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDateTime,
    pub category: Option<String>,
    pub frequency: Option<BillFrequency>,
    pub notes: Option<String>,
    pub reminder_preferences: Option<ReminderPreferences>,
    pub loan_details: Option<NewLoanDetails>,
}

/// Partial update payload for a bill.
///
/// `is_paid` is deliberately absent: paid transitions only happen through the
/// mark-paid operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    pub account_name: Option<String>,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDateTime>,
    pub category: Option<String>,
    pub frequency: Option<BillFrequency>,
    pub notes: Option<String>,
    pub reminder_preferences: Option<ReminderPreferencesUpdate>,
}

/// Immutable audit record written when a bill transitions to paid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub bill_id: String,
    pub amount: Decimal,
    pub payment_date: NaiveDateTime,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
