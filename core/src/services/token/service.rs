//! Token service implementation.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ql_shared::config::AuthConfig;

use crate::domain::entities::token::{Claims, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, TokenError};

/// Mints and verifies session tokens.
///
/// Tokens are stateless HS256 JWTs bound to a phone number. There is no
/// revocation list: validity is signature plus expiry, nothing else.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_hours: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            expiry_hours: config.token_expiry_hours,
        }
    }

    /// Mint a session token bound to `phone`.
    pub fn issue(&self, phone: &str) -> Result<String, DomainError> {
        let claims = Claims::new_session(phone, self.expiry_hours);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Session token encoding failed");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verify a presented token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                let token_error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidToken => TokenError::InvalidTokenFormat,
                    ErrorKind::InvalidIssuer
                    | ErrorKind::InvalidAudience
                    | ErrorKind::ImmatureSignature => TokenError::InvalidClaims,
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(token_error)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::new("test-secret"))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let token = svc.issue("+12025550123").unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.phone(), "+12025550123");
        assert_eq!(claims.iss, JWT_ISSUER);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = service().issue("+12025550123").unwrap();
        let other = TokenService::new(&AuthConfig::new("different-secret"));

        let err = other.verify(&token).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Token(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let err = service().verify("not-a-jwt").unwrap_err();
        assert!(matches!(err, DomainError::Token(_)));
    }

    #[test]
    fn test_token_carries_only_the_phone_subject() {
        let svc = service();
        let token = svc.issue("+12025550123").unwrap();
        let claims = svc.verify(&token).unwrap();

        // No subscription or plan data rides in the session
        let value = serde_json::to_value(&claims).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 7);
        for key in ["sub", "iat", "exp", "nbf", "iss", "aud", "jti"] {
            assert!(keys.contains(&key));
        }
    }
}
