//! Verification record entity for SMS-based two-factor flows.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Flow a verification code was issued for. The purpose recorded at
/// issuance must match the purpose presented at verification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    Signup,
    Login,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Signup => "signup",
            CodePurpose::Login => "login",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outstanding verification per phone number.
///
/// A fresh `initiate` overwrites any prior record; a resend rotates the
/// code and refreshes `last_retry_at` but never `issued_at`, so the
/// expiry window is always measured from the original issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Phone number this code was sent to (E.164)
    pub phone: String,

    /// The 6-digit verification code, kept as a string
    pub code: String,

    /// Flow the code was issued for
    pub purpose: CodePurpose,

    /// Timestamp of the original issuance; anchors the expiry window
    pub issued_at: DateTime<Utc>,

    /// Timestamp of the most recent send; anchors the resend cooldown
    pub last_retry_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a new record with a freshly generated code,
    /// `issued_at` and `last_retry_at` both set to `now`.
    pub fn new(phone: impl Into<String>, purpose: CodePurpose, now: DateTime<Utc>) -> Self {
        Self {
            phone: phone.into(),
            code: Self::generate_code(),
            purpose,
            issued_at: now,
            last_retry_at: now,
        }
    }

    /// Generates a uniformly random 6-digit code using the OS CSPRNG.
    fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Whether the code has outlived its validity window at `now`.
    ///
    /// Measured from `issued_at`, not from the last resend.
    pub fn is_expired_at(&self, now: DateTime<Utc>, expiry_seconds: i64) -> bool {
        (now - self.issued_at).num_seconds() > expiry_seconds
    }

    /// Seconds until another resend is allowed, zero if the cooldown
    /// has already elapsed.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown_seconds: i64) -> i64 {
        let elapsed = (now - self.last_retry_at).num_seconds();
        (cooldown_seconds - elapsed).max(0)
    }

    /// Constant-time comparison of the stored code against user input.
    /// Codes are strings; a numeric comparison would drop leading zeros.
    pub fn matches_code(&self, input: &str) -> bool {
        self.code.len() == input.len() && constant_time_eq(self.code.as_bytes(), input.as_bytes())
    }

    /// Rotates the code for a resend: a new code is generated and the
    /// cooldown clock restarts, but the expiry clock keeps running.
    pub fn rotate_code(&mut self, now: DateTime<Utc>) {
        self.code = Self::generate_code();
        self.last_retry_at = now;
    }
}
