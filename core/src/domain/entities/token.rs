//! Session token claims for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token lifetime (24 hours).
///
/// The token is stateless; validity is determined solely by signature
/// and expiry, with no server-side revocation list.
pub const SESSION_TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT issuer
pub const JWT_ISSUER: &str = "quietline";

/// JWT audience
pub const JWT_AUDIENCE: &str = "quietline-api";

/// Claims structure for the session token payload.
///
/// The subject is the account's phone number and is the only claim
/// consumed downstream. Subscription state is deliberately absent:
/// it is re-queried per request rather than snapshotted at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (phone number)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for a new session token bound to `phone`.
    pub fn new_session(phone: &str, expiry_hours: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::hours(expiry_hours);

        Self {
            sub: phone.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// The phone number this token is bound to.
    pub fn phone(&self) -> &str {
        &self.sub
    }

    /// Whether the claims have expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Expiration as a `DateTime`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
