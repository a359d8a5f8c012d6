//! Server configuration, resolved once from the environment at startup.

use anyhow::Context;

use billfold_ai::GeminiConfig;
use billfold_channels::{BlandConfig, TwilioConfig};
use billfold_core::reminders::ReminderWindowMode;

/// Voice used for reminder calls unless overridden.
const DEFAULT_BLAND_VOICE_ID: &str = "e1289219-0ea2-4f22-a994-c542c2a48a0f";

pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub reminder_window_mode: ReminderWindowMode,
    pub twilio: TwilioConfig,
    pub bland: BlandConfig,
    pub gemini: GeminiConfig,
}

impl Config {
    /// Read and validate the configuration. Channel credentials are checked
    /// here, before anything starts: a deployment missing a required secret
    /// fails at boot instead of at the first sweep.
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr =
            std::env::var("BILLFOLD_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let db_path =
            std::env::var("BILLFOLD_DB_PATH").unwrap_or_else(|_| "data/billfold.db".to_string());
        let default_country_code =
            std::env::var("BILLFOLD_COUNTRY_CODE").unwrap_or_else(|_| "+91".to_string());

        let reminder_window_mode = match std::env::var("BILLFOLD_REMINDER_WINDOW")
            .unwrap_or_else(|_| "fixed".to_string())
            .as_str()
        {
            "user-configured" => ReminderWindowMode::UserConfigured,
            _ => ReminderWindowMode::Fixed,
        };

        let twilio = TwilioConfig {
            account_sid: required_env("TWILIO_ACCOUNT_SID")?,
            auth_token: required_env("TWILIO_AUTH_TOKEN")?,
            whatsapp_from: std::env::var("TWILIO_WHATSAPP_FROM")
                .unwrap_or_else(|_| "whatsapp:+14155238886".to_string()),
            default_country_code: default_country_code.clone(),
        };
        twilio.validate().map_err(anyhow::Error::new)?;

        let bland = BlandConfig {
            api_key: required_env("BLAND_AI_API_KEY")?,
            voice_id: std::env::var("BLAND_VOICE_ID")
                .unwrap_or_else(|_| DEFAULT_BLAND_VOICE_ID.to_string()),
            default_country_code,
        };
        bland.validate().map_err(anyhow::Error::new)?;

        // Generation degrades to the templated fallback without a key, so an
        // absent key is a warning rather than a boot failure.
        let gemini_key = std::env::var("GOOGLE_API_KEY").unwrap_or_default();
        if gemini_key.is_empty() {
            tracing::warn!(
                "GOOGLE_API_KEY is not set; reminders will use the templated fallback text"
            );
        }
        let gemini = GeminiConfig::new(gemini_key);

        Ok(Self {
            listen_addr,
            db_path,
            reminder_window_mode,
            twilio,
            bland,
            gemini,
        })
    }
}

fn required_env(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("required environment variable {key} is not set"))
}
