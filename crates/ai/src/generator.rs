//! Reminder message generation.
//!
//! Generates a short, friendly payment reminder with Gemini. Falls back to a
//! deterministic templated message whenever generation fails, so callers
//! never see an error from this module.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, Timelike};
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

use crate::error::AiError;
use billfold_core::constants::CURRENCY_SYMBOL;
use billfold_core::reminders::{BillSummary, MessageGeneratorTrait};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Gemini credentials and model selection, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// The templated message used whenever generation is unavailable.
pub fn fallback_message(user_name: &str, bill: &BillSummary) -> String {
    format!(
        "Hi {}, this is a reminder that your payment for '{}' is due on {}. \
         Amount due: {}{}.",
        user_name,
        bill.name,
        bill.due_date.format("%Y-%m-%d"),
        CURRENCY_SYMBOL,
        bill.amount
    )
}

/// Time-of-day greeting woven into the generation prompt.
fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Message generator backed by Gemini.
pub struct GeminiMessageGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiMessageGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { config, client }
    }

    fn build_prompt(&self, user_name: &str, bill: &BillSummary) -> String {
        let greeting = greeting_for_hour(Local::now().hour());
        format!(
            "You are a friendly financial assistant creating a reminder message.\n\n\
             Create a natural, friendly reminder with this structure:\n\
             1. Start with: \"Hey {user_name}, {greeting}.\"\n\
             2. Remind about the bill payment:\n\
                - Bill: {}\n\
                - Amount: {CURRENCY_SYMBOL}{}\n\
                - Due Date: {}\n\
             3. End with: \"Hope you have a nice day.\"\n\n\
             Keep it brief and friendly.",
            bill.name,
            bill.amount,
            bill.due_date.format("%Y-%m-%d"),
        )
    }

    async fn generate_with_gemini(
        &self,
        user_name: &str,
        bill: &BillSummary,
    ) -> Result<String, AiError> {
        if self.config.api_key.is_empty() {
            return Err(AiError::MissingApiKey);
        }

        let url = format!(
            "{API_BASE_URL}/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        );
        let prompt = self.build_prompt(user_name, bill);
        debug!("Generating reminder text for '{}'", bill.name);

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        let text = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| AiError::InvalidResponse("no candidate text".to_string()))?
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(AiError::InvalidResponse("empty candidate text".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl MessageGeneratorTrait for GeminiMessageGenerator {
    async fn generate(&self, user_name: &str, bill: &BillSummary) -> String {
        match self.generate_with_gemini(user_name, bill).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Message generation failed, using fallback: {e}");
                fallback_message(user_name, bill)
            }
        }
    }
}

// ============================================================================
// Fake Generator for Testing
// ============================================================================

/// A fake generator that returns a fixed message, or the fallback template
/// when none is configured.
pub struct FakeMessageGenerator {
    pub fixed_message: Option<String>,
}

impl FakeMessageGenerator {
    pub fn with_message(message: &str) -> Self {
        Self {
            fixed_message: Some(message.to_string()),
        }
    }

    pub fn with_fallback() -> Self {
        Self {
            fixed_message: None,
        }
    }
}

#[async_trait]
impl MessageGeneratorTrait for FakeMessageGenerator {
    async fn generate(&self, user_name: &str, bill: &BillSummary) -> String {
        match &self.fixed_message {
            Some(message) => message.clone(),
            None => fallback_message(user_name, bill),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bill() -> BillSummary {
        BillSummary {
            name: "Electricity".to_string(),
            amount: dec!(1200),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        }
    }

    #[test]
    fn test_fallback_message_format() {
        assert_eq!(
            fallback_message("Priya", &bill()),
            "Hi Priya, this is a reminder that your payment for 'Electricity' \
             is due on 2025-03-10. Amount due: ₹1200."
        );
    }

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting_for_hour(6), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(16), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good evening");
        assert_eq!(greeting_for_hour(2), "Good evening");
    }

    #[tokio::test]
    async fn test_fake_generator_fixed() {
        let generator = FakeMessageGenerator::with_message("pay up");
        assert_eq!(generator.generate("Priya", &bill()).await, "pay up");
    }

    #[tokio::test]
    async fn test_fake_generator_fallback() {
        let generator = FakeMessageGenerator::with_fallback();
        let message = generator.generate("Priya", &bill()).await;
        assert!(message.starts_with("Hi Priya,"));
        assert!(message.contains("'Electricity'"));
    }

    #[tokio::test]
    async fn test_gemini_without_key_falls_back() {
        let generator = GeminiMessageGenerator::new(GeminiConfig::new(String::new()));
        let message = generator.generate("Priya", &bill()).await;
        assert_eq!(message, fallback_message("Priya", &bill()));
    }
}
