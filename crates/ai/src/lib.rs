//! Billfold AI - reminder message generation.
//!
//! Implements the `MessageGeneratorTrait` defined in `billfold-core` with a
//! Gemini-backed generator. Generation is best-effort by design: any upstream
//! failure is recovered with a deterministic templated message.

mod error;
mod generator;

pub use error::AiError;
pub use generator::{
    fallback_message, FakeMessageGenerator, GeminiConfig, GeminiMessageGenerator,
};
