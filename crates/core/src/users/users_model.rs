//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain model representing a registered user.
///
/// Registration and credential handling live in the external auth provider;
/// the core only reads users to resolve reminder recipients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Contact address for the message and voice channels. Users without one
    /// are skipped by every sweep.
    pub phone_number: Option<String>,
    pub created_at: NaiveDateTime,
}

impl User {
    /// The contact address, treating an empty string as absent.
    pub fn contact_number(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .filter(|number| !number.trim().is_empty())
    }
}
