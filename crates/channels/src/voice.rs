//! Voice-call delivery via the Bland.ai call API.
//!
//! A call is placed with the reminder text as the agent task; Bland reads it
//! to the recipient. API documentation: https://docs.bland.ai/api-v1/post/calls

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ChannelError;
use crate::phone;
use billfold_core::errors::Result;
use billfold_core::reminders::VoiceSenderTrait;

const PROVIDER: &str = "Bland";
const CALL_URL: &str = "https://api.bland.ai/call";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bland.ai credentials, resolved once at startup.
#[derive(Debug, Clone)]
pub struct BlandConfig {
    pub api_key: String,
    /// Stable voice identifier used for all reminder calls.
    pub voice_id: String,
    pub default_country_code: String,
}

impl BlandConfig {
    pub fn validate(&self) -> std::result::Result<(), ChannelError> {
        if self.api_key.is_empty() {
            return Err(ChannelError::MissingCredential {
                provider: PROVIDER,
                key: "api_key",
            });
        }
        if self.voice_id.is_empty() {
            return Err(ChannelError::MissingCredential {
                provider: PROVIDER,
                key: "voice_id",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CallResponse {
    #[serde(default)]
    call_id: Option<String>,
}

/// Voice-call sender backed by Bland.ai.
pub struct BlandVoiceSender {
    config: BlandConfig,
    client: Client,
}

impl BlandVoiceSender {
    pub fn new(config: BlandConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { config, client }
    }
}

#[async_trait]
impl VoiceSenderTrait for BlandVoiceSender {
    async fn place_call(&self, phone_number: &str, message: &str) -> Result<String> {
        let to = phone::canonicalize(phone_number, &self.config.default_country_code);
        debug!("Placing voice call to {to}");

        let body = serde_json::json!({
            "phone_number": to,
            "task": message,
            "voice_id": self.config.voice_id,
        });

        let response = self
            .client
            .post(CALL_URL)
            .header("authorization", &self.config.api_key)
            .json(&body)
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

        let parsed: CallResponse =
            response
                .json()
                .await
                .map_err(|e| ChannelError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        let call_id = parsed.call_id.unwrap_or_else(|| "unknown".to_string());
        info!("Voice call {call_id} triggered");
        Ok(call_id)
    }
}
