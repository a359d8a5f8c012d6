//! Channel fan-out for on-time reminders.

use std::sync::Arc;

use log::{debug, error, info};

use crate::bills::Bill;
use crate::reminders::reminders_model::{ChannelOutcome, DispatchResult, ReminderChannel};
use crate::reminders::reminders_traits::{MessageSenderTrait, VoiceSenderTrait};
use crate::settings::ReminderSettings;
use crate::users::User;

/// Fans a generated message out to the enabled channels.
///
/// A channel is eligible only when the user-level setting AND the bill-level
/// flag are both on. The two attempts run concurrently: one channel's latency
/// or failure never delays or aborts the other. Sender errors are recorded in
/// the result and logged; they do not propagate past this boundary.
pub struct ChannelDispatcher {
    whatsapp_sender: Arc<dyn MessageSenderTrait>,
    voice_sender: Arc<dyn VoiceSenderTrait>,
}

impl ChannelDispatcher {
    pub fn new(
        whatsapp_sender: Arc<dyn MessageSenderTrait>,
        voice_sender: Arc<dyn VoiceSenderTrait>,
    ) -> Self {
        Self {
            whatsapp_sender,
            voice_sender,
        }
    }

    pub async fn dispatch(
        &self,
        user: &User,
        settings: &ReminderSettings,
        bill: &Bill,
        message: &str,
    ) -> DispatchResult {
        let Some(phone_number) = user.contact_number() else {
            debug!("User {} has no phone number, nothing to dispatch", user.id);
            return DispatchResult::default();
        };

        let whatsapp_eligible =
            settings.whatsapp_enabled && bill.reminder_preferences.enable_whatsapp;
        let call_eligible = settings.call_enabled && bill.reminder_preferences.enable_call;

        let whatsapp_attempt = async {
            if !whatsapp_eligible {
                debug!(
                    "WhatsApp skipped for bill {} (settings: {}, bill: {})",
                    bill.id, settings.whatsapp_enabled, bill.reminder_preferences.enable_whatsapp
                );
                return None;
            }
            Some(match self.whatsapp_sender.send(phone_number, message).await {
                Ok(sid) => {
                    info!("WhatsApp reminder sent for bill {} ({sid})", bill.id);
                    ChannelOutcome::sent(sid)
                }
                Err(e) => {
                    error!("WhatsApp reminder failed for bill {}: {e}", bill.id);
                    ChannelOutcome::failed(e.to_string())
                }
            })
        };

        let call_attempt = async {
            if !call_eligible {
                debug!(
                    "Voice call skipped for bill {} (settings: {}, bill: {})",
                    bill.id, settings.call_enabled, bill.reminder_preferences.enable_call
                );
                return None;
            }
            Some(
                match self.voice_sender.place_call(phone_number, message).await {
                    Ok(call_id) => {
                        info!("Voice reminder placed for bill {} ({call_id})", bill.id);
                        ChannelOutcome::sent(call_id)
                    }
                    Err(e) => {
                        error!("Voice reminder failed for bill {}: {e}", bill.id);
                        ChannelOutcome::failed(e.to_string())
                    }
                },
            )
        };

        let (whatsapp_outcome, call_outcome) = tokio::join!(whatsapp_attempt, call_attempt);

        let mut result = DispatchResult::default();
        if let Some(outcome) = whatsapp_outcome {
            result.sent_any |= outcome.success;
            result.outcomes.push((ReminderChannel::Whatsapp, outcome));
        }
        if let Some(outcome) = call_outcome {
            result.sent_any |= outcome.success;
            result.outcomes.push((ReminderChannel::Call, outcome));
        }
        result
    }
}
