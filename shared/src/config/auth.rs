//! Authentication configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Session token lifetime in hours. The product uses a single fixed window;
/// validity is determined entirely by signature and expiry.
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// Session token lifetime in hours
    pub token_expiry_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_SECRET),
            token_expiry_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
        }
    }
}

impl AuthConfig {
    /// Create a configuration with an explicit secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables (`JWT_SECRET`, `TOKEN_EXPIRY_HOURS`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret);
        let token_expiry_hours = std::env::var("TOKEN_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_expiry_hours);

        Self {
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Whether the development fallback secret is in use
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_expiry_hours, 24);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_explicit_secret() {
        let config = AuthConfig::new("my-secret");
        assert!(!config.is_using_default_secret());
        assert_eq!(config.token_expiry_hours, DEFAULT_TOKEN_EXPIRY_HOURS);
    }
}
