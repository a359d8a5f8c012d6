//! Generation error types.
//!
//! These never cross the generator trait boundary: every failure is recovered
//! locally with the deterministic fallback template. They exist so the
//! fallback path can log what actually went wrong.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}
