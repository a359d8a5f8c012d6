use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, error, info, warn};

use super::dispatch::ChannelDispatcher;
use super::reminders_model::{
    AlertAttempt, BillSummary, ChannelOutcome, RecurrenceSweepReport, ReminderChannel,
    ReminderSweepReport,
};
use super::reminders_traits::{
    MessageGeneratorTrait, MessageSenderTrait, ReminderServiceTrait, VoiceSenderTrait,
};
use super::schedule::{is_reminder_due, is_reminder_due_within, next_due_date, ReminderWindowMode};
use super::tracker;
use crate::bills::{Bill, BillRepositoryTrait, NewBill};
use crate::constants::{CURRENCY_SYMBOL, OVERDUE_ALERT_MAX_DAYS, RECURRING_NOTES_MARKER};
use crate::errors::{Result, ValidationError};
use crate::settings::{ReminderSettings, ReminderSettingsRepositoryTrait};
use crate::users::{User, UserRepositoryTrait};

const WHATSAPP_TEST_MESSAGE: &str =
    "Whatsapp Test successfully done! Your number is ready for future reminders :)";

/// The reminder engine.
///
/// Owns no schedule of its own: the server's sweep scheduler invokes the
/// three `run_*` methods on their cadences. Per-entity failures are logged
/// and skipped so a single bad row or sender outage never aborts a sweep.
pub struct ReminderService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    settings_repository: Arc<dyn ReminderSettingsRepositoryTrait>,
    bill_repository: Arc<dyn BillRepositoryTrait>,
    generator: Arc<dyn MessageGeneratorTrait>,
    whatsapp_sender: Arc<dyn MessageSenderTrait>,
    voice_sender: Arc<dyn VoiceSenderTrait>,
    dispatcher: ChannelDispatcher,
    window_mode: ReminderWindowMode,
}

impl ReminderService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        settings_repository: Arc<dyn ReminderSettingsRepositoryTrait>,
        bill_repository: Arc<dyn BillRepositoryTrait>,
        generator: Arc<dyn MessageGeneratorTrait>,
        whatsapp_sender: Arc<dyn MessageSenderTrait>,
        voice_sender: Arc<dyn VoiceSenderTrait>,
        window_mode: ReminderWindowMode,
    ) -> Self {
        let dispatcher = ChannelDispatcher::new(whatsapp_sender.clone(), voice_sender.clone());
        Self {
            user_repository,
            settings_repository,
            bill_repository,
            generator,
            whatsapp_sender,
            voice_sender,
            dispatcher,
            window_mode,
        }
    }

    fn window_matches(&self, today: NaiveDate, bill: &Bill, settings: &ReminderSettings) -> bool {
        match self.window_mode {
            ReminderWindowMode::Fixed => is_reminder_due(today, bill.due_day()),
            ReminderWindowMode::UserConfigured => {
                is_reminder_due_within(today, bill.due_day(), i64::from(settings.days_before.max(0)))
            }
        }
    }

    async fn sweep_user_bills(
        &self,
        user: &User,
        settings: &ReminderSettings,
        today: NaiveDate,
        report: &mut ReminderSweepReport,
    ) {
        let bills = match self.bill_repository.list_unpaid_by_user(&user.id) {
            Ok(bills) => bills,
            Err(e) => {
                error!("Failed to load unpaid bills for user {}: {e}", user.id);
                return;
            }
        };
        debug!("Found {} unpaid bills for user {}", bills.len(), user.id);

        for bill in &bills {
            if !self.window_matches(today, bill, settings) {
                debug!("Bill {} outside the reminder window", bill.id);
                continue;
            }
            report.bills_matched += 1;

            let message = self
                .generator
                .generate(&user.name, &BillSummary::from(bill))
                .await;
            let result = self.dispatcher.dispatch(user, settings, bill, &message).await;
            if result.sent_any {
                report.reminders_sent += 1;
                tracker::mark_sent(&self.bill_repository, bill, today).await;
            }
        }
    }

    fn overdue_alert_text(bill: &Bill, days_overdue: i64) -> String {
        format!(
            "URGENT: Your {} payment of {}{} is {} days overdue. \
             Please pay immediately to avoid late fees.",
            bill.name, CURRENCY_SYMBOL, bill.amount, days_overdue
        )
    }
}

#[async_trait]
impl ReminderServiceTrait for ReminderService {
    async fn run_reminder_sweep(&self, now: NaiveDateTime) -> Result<ReminderSweepReport> {
        let current_minute = now.format("%H:%M").to_string();
        let today = now.date();
        debug!("Reminder sweep at {current_minute}");

        let users = self.user_repository.list_with_phone_number()?;
        let mut report = ReminderSweepReport {
            users_scanned: users.len(),
            ..Default::default()
        };

        for user in &users {
            let settings = match self.settings_repository.get_by_user(&user.id) {
                Ok(Some(settings)) => settings,
                Ok(None) => {
                    warn!("No reminder settings for user {}, skipping", user.id);
                    continue;
                }
                Err(e) => {
                    error!("Failed to load settings for user {}: {e}", user.id);
                    continue;
                }
            };

            // Exact match on the HH:MM string: each user gets one evaluation
            // opportunity per day, at their preferred minute.
            if settings.effective_preferred_time() != current_minute {
                continue;
            }
            report.users_matched += 1;
            info!(
                "Preferred time {} matched for user {}",
                current_minute, user.id
            );

            self.sweep_user_bills(user, &settings, today, &mut report)
                .await;
        }

        info!(
            "Reminder sweep done: {}/{} users matched, {} bills matched, {} sent",
            report.users_matched, report.users_scanned, report.bills_matched, report.reminders_sent
        );
        Ok(report)
    }

    async fn run_recurrence_sweep(&self, today: NaiveDate) -> Result<RecurrenceSweepReport> {
        let bills = self.bill_repository.list_paid_recurring()?;
        let mut report = RecurrenceSweepReport {
            bills_examined: bills.len(),
            ..Default::default()
        };
        info!("Recurrence sweep over {} paid recurring bills", bills.len());

        for bill in &bills {
            let Some(next_due) = next_due_date(bill.due_day(), bill.frequency) else {
                continue;
            };
            // Never materialize an instance that is already due or past.
            if next_due <= today {
                debug!(
                    "Skipping bill {}: next due {} is not in the future",
                    bill.id, next_due
                );
                continue;
            }
            let next_due_at = next_due.and_time(NaiveTime::MIN);

            match self
                .bill_repository
                .unpaid_duplicate_exists(&bill.user_id, &bill.name, next_due_at)
            {
                Ok(true) => {
                    debug!("Instance for bill {} due {} already exists", bill.id, next_due);
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    error!("Duplicate check failed for bill {}: {e}", bill.id);
                    continue;
                }
            }

            let new_bill = NewBill {
                account_name: bill.account_name.clone(),
                name: bill.name.clone(),
                amount: bill.amount,
                due_date: next_due_at,
                category: Some(bill.category.clone()),
                frequency: Some(bill.frequency),
                notes: Some(RECURRING_NOTES_MARKER.to_string()),
                reminder_preferences: Some(bill.reminder_preferences),
                loan_details: None,
            };
            match self.bill_repository.create(&bill.user_id, new_bill).await {
                Ok(created) => {
                    info!(
                        "Generated recurring instance {} of '{}' due {}",
                        created.id, created.name, next_due
                    );
                    report.instances_generated += 1;
                }
                Err(e) => {
                    error!("Failed to generate instance for bill {}: {e}", bill.id);
                }
            }
        }

        info!(
            "Recurrence sweep done: {} generated",
            report.instances_generated
        );
        Ok(report)
    }

    async fn run_overdue_sweep(&self, now: NaiveDateTime) -> Result<Vec<AlertAttempt>> {
        let bills = self.bill_repository.list_unpaid_due_before(now)?;
        info!("Overdue sweep over {} past-due bills", bills.len());
        let mut attempts = Vec::new();

        for bill in &bills {
            let days_overdue = (now - bill.due_date).num_days();
            if !(0..=OVERDUE_ALERT_MAX_DAYS).contains(&days_overdue) {
                debug!(
                    "Bill {} is {} days overdue, outside the alert window",
                    bill.id, days_overdue
                );
                continue;
            }

            let user = match self.user_repository.get_by_id(&bill.user_id) {
                Ok(user) => user,
                Err(e) => {
                    warn!("User lookup failed for overdue bill {}: {e}", bill.id);
                    continue;
                }
            };
            let Some(phone_number) = user.contact_number() else {
                warn!("No phone number for user {}, skipping alert", user.id);
                continue;
            };

            // Deliberately gated on the bill flag alone: the overdue path has
            // always ignored the user-level channel toggles.
            if !bill.reminder_preferences.enable_whatsapp {
                debug!("WhatsApp disabled for overdue bill {}", bill.id);
                continue;
            }

            let message = Self::overdue_alert_text(bill, days_overdue);
            let outcome = match self.whatsapp_sender.send(phone_number, &message).await {
                Ok(sid) => {
                    info!("Overdue alert sent for bill {} ({sid})", bill.id);
                    ChannelOutcome::sent(sid)
                }
                Err(e) => {
                    error!("Overdue alert failed for bill {}: {e}", bill.id);
                    ChannelOutcome::failed(e.to_string())
                }
            };
            attempts.push(AlertAttempt {
                bill_id: bill.id.clone(),
                user_id: bill.user_id.clone(),
                days_overdue,
                outcome,
            });
        }

        Ok(attempts)
    }

    async fn send_manual_reminder(
        &self,
        user_id: &str,
        bill_id: &str,
        channel: ReminderChannel,
    ) -> Result<ChannelOutcome> {
        let user = self.user_repository.get_by_id(user_id)?;
        let Some(phone_number) = user.contact_number() else {
            return Err(ValidationError::InvalidInput(
                "Phone number required for reminders".to_string(),
            )
            .into());
        };
        let bill = self.bill_repository.get_for_user(user_id, bill_id)?;

        let message = self
            .generator
            .generate(&user.name, &BillSummary::from(&bill))
            .await;

        let enabled = match channel {
            ReminderChannel::Whatsapp => bill.reminder_preferences.enable_whatsapp,
            ReminderChannel::Call => bill.reminder_preferences.enable_call,
        };
        if !enabled {
            return Err(ValidationError::InvalidInput(format!(
                "Reminder channel '{}' is not enabled for this bill",
                channel.as_str()
            ))
            .into());
        }

        let outcome = match channel {
            ReminderChannel::Whatsapp => match self.whatsapp_sender.send(phone_number, &message).await
            {
                Ok(sid) => ChannelOutcome::sent(sid),
                Err(e) => ChannelOutcome::failed(e.to_string()),
            },
            ReminderChannel::Call => {
                match self.voice_sender.place_call(phone_number, &message).await {
                    Ok(call_id) => ChannelOutcome::sent(call_id),
                    Err(e) => ChannelOutcome::failed(e.to_string()),
                }
            }
        };
        Ok(outcome)
    }

    async fn send_test_message(
        &self,
        user_id: &str,
        channel: ReminderChannel,
    ) -> Result<ChannelOutcome> {
        let user = self.user_repository.get_by_id(user_id)?;
        let Some(phone_number) = user.contact_number() else {
            return Err(ValidationError::InvalidInput(
                "Phone number required for reminders".to_string(),
            )
            .into());
        };

        let outcome = match channel {
            ReminderChannel::Whatsapp => {
                match self.whatsapp_sender.send(phone_number, WHATSAPP_TEST_MESSAGE).await {
                    Ok(sid) => ChannelOutcome::sent(sid),
                    Err(e) => ChannelOutcome::failed(e.to_string()),
                }
            }
            ReminderChannel::Call => {
                let message = format!(
                    "Hello {}. This is a test call from your bills reminder application. \
                     Your reminders are set up correctly. Goodbye.",
                    user.name
                );
                match self.voice_sender.place_call(phone_number, &message).await {
                    Ok(call_id) => ChannelOutcome::sent(call_id),
                    Err(e) => ChannelOutcome::failed(e.to_string()),
                }
            }
        };
        Ok(outcome)
    }
}
