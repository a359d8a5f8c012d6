//! Channel-specific error types.

use thiserror::Error;

use billfold_core::errors::Error;

/// Errors raised by the outbound delivery channels.
///
/// Converted to `billfold_core::Error::Channel` at the trait boundary, so the
/// sweep engine sees a single opaque channel failure type.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Request to {provider} failed: {message}")]
    Request { provider: &'static str, message: String },

    #[error("{provider} request timed out")]
    Timeout { provider: &'static str },

    #[error("{provider} returned HTTP {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unexpected {provider} response: {message}")]
    InvalidResponse { provider: &'static str, message: String },

    #[error("Missing credential for {provider}: {key}")]
    MissingCredential { provider: &'static str, key: &'static str },
}

impl ChannelError {
    pub fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChannelError::Timeout { provider }
        } else {
            ChannelError::Request {
                provider,
                message: err.to_string(),
            }
        }
    }
}

impl From<ChannelError> for Error {
    fn from(err: ChannelError) -> Self {
        Error::Channel(err.to_string())
    }
}
