//! Verification code configuration

use serde::{Deserialize, Serialize};

/// Verification code lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds a code remains valid after it was first issued
    pub code_expiry_seconds: i64,

    /// Minimum seconds between resend requests for the same phone number
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiry_seconds: 300,
            resend_cooldown_seconds: 60,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    /// (`CODE_EXPIRY_SECONDS`, `RESEND_COOLDOWN_SECONDS`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let code_expiry_seconds = std::env::var("CODE_EXPIRY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.code_expiry_seconds);
        let resend_cooldown_seconds = std::env::var("RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.resend_cooldown_seconds);

        Self {
            code_expiry_seconds,
            resend_cooldown_seconds,
        }
    }
}
