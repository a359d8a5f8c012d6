//! WhatsApp delivery via the Twilio Messages API.
//!
//! Twilio's WhatsApp transport is a regular message send with `whatsapp:`
//! prefixed addresses. API documentation:
//! https://www.twilio.com/docs/whatsapp/api

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ChannelError;
use crate::phone;
use billfold_core::errors::Result;
use billfold_core::reminders::MessageSenderTrait;

const PROVIDER: &str = "Twilio";
const API_BASE_URL: &str = "https://api.twilio.com/2010-04-01";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Twilio WhatsApp credentials and addressing, resolved once at startup.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender address, e.g. `whatsapp:+14155238886`.
    pub whatsapp_from: String,
    /// Prefix applied to stored numbers without a `+` country code.
    pub default_country_code: String,
}

impl TwilioConfig {
    /// Eager credential check, run by the composition root before the
    /// scheduler starts.
    pub fn validate(&self) -> std::result::Result<(), ChannelError> {
        if self.account_sid.is_empty() {
            return Err(ChannelError::MissingCredential {
                provider: PROVIDER,
                key: "account_sid",
            });
        }
        if self.auth_token.is_empty() {
            return Err(ChannelError::MissingCredential {
                provider: PROVIDER,
                key: "auth_token",
            });
        }
        if self.whatsapp_from.is_empty() {
            return Err(ChannelError::MissingCredential {
                provider: PROVIDER,
                key: "whatsapp_from",
            });
        }
        Ok(())
    }
}

/// Successful create-message response (fields we consume).
#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

/// WhatsApp sender backed by Twilio.
pub struct TwilioWhatsAppSender {
    config: TwilioConfig,
    client: Client,
}

impl TwilioWhatsAppSender {
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { config, client }
    }
}

#[async_trait]
impl MessageSenderTrait for TwilioWhatsAppSender {
    async fn send(&self, phone_number: &str, message: &str) -> Result<String> {
        let to = phone::canonicalize(phone_number, &self.config.default_country_code);
        let url = format!(
            "{API_BASE_URL}/Accounts/{}/Messages.json",
            self.config.account_sid
        );
        debug!("Sending WhatsApp message to {to} ({} chars)", message.len());

        let whatsapp_to = format!("whatsapp:{to}");
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("Body", message),
                ("From", self.config.whatsapp_from.as_str()),
                ("To", whatsapp_to.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ChannelError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: MessageResponse =
            response
                .json()
                .await
                .map_err(|e| ChannelError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        info!(
            "WhatsApp message {} accepted (status: {})",
            parsed.sid,
            parsed.status.as_deref().unwrap_or("unknown")
        );
        Ok(parsed.sid)
    }
}
