//! Outbound reminder delivery channels.
//!
//! Implements the sender traits defined in `billfold-core`: WhatsApp messages
//! through Twilio and voice calls through Bland.ai. Credentials are carried
//! in explicit config structs validated eagerly at startup; every client uses
//! a bounded request timeout so a stalled provider cannot hang a sweep.

pub mod errors;
pub mod phone;
pub mod voice;
pub mod whatsapp;

pub use errors::ChannelError;
pub use voice::{BlandConfig, BlandVoiceSender};
pub use whatsapp::{TwilioConfig, TwilioWhatsAppSender};
