//! Billfold Core - Domain entities, services, and the reminder engine.
//!
//! This crate contains the core business logic for Billfold. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate; outbound delivery and message generation are
//! reached through the sender/generator traits implemented by the
//! `channels` and `ai` crates.

pub mod bills;
pub mod constants;
pub mod errors;
pub mod loans;
pub mod reminders;
pub mod settings;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
