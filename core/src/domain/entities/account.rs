//! Account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Quietline account, keyed by phone number.
///
/// Accounts are created unverified at signup submission and become
/// verified only after the first successful signup verification.
/// Accounts are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Phone number in E.164 format; the primary key
    pub phone: String,

    /// Email address, unique across accounts
    pub email: String,

    /// Whether the account has completed signup verification
    pub verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account.
    pub fn new(phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            email: email.into(),
            verified: false,
            created_at: Utc::now(),
        }
    }

    /// Marks the account as verified.
    pub fn verify(&mut self) {
        self.verified = true;
    }
}
