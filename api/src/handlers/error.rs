//! Maps domain errors onto HTTP responses.
//!
//! Every error body is `{"message": ...}`; rate limiting additionally
//! carries `remainingTime` so clients can show a countdown. Internal
//! details never reach the wire: 5xx bodies are generic, with a
//! correlation id logged server-side for the operator to grep.

use actix_web::HttpResponse;
use uuid::Uuid;

use ql_core::errors::{DomainError, TokenError, ValidationError, VerificationError};

/// Render a domain error as the appropriate HTTP response.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation(validation) => validation_response(validation),
        DomainError::Verification(verification) => verification_response(verification),
        DomainError::Token(token) => token_response(token),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(serde_json::json!({
            "message": format!("{resource} not found"),
        })),
        DomainError::Internal { message } => {
            let correlation_id = Uuid::new_v4();
            tracing::error!(%correlation_id, error = %message, "Internal error");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Internal server error",
            }))
        }
        DomainError::Upstream { message } => {
            let correlation_id = Uuid::new_v4();
            tracing::error!(%correlation_id, error = %message, "Upstream dependency failed");
            HttpResponse::BadGateway().json(serde_json::json!({
                "message": "Service temporarily unavailable",
            }))
        }
    }
}

/// Render a request-shape validation failure (from the DTO layer's
/// `validator` checks) as a 400 naming the offending fields.
pub fn request_validation_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    HttpResponse::BadRequest().json(serde_json::json!({
        "message": format!("Invalid request data: {}", fields.join(", ")),
    }))
}

fn validation_response(error: &ValidationError) -> HttpResponse {
    let message = match error {
        ValidationError::RequiredField { field } => format!("{field} is required"),
        ValidationError::InvalidPhoneFormat => "Invalid phone number format".to_string(),
        ValidationError::InvalidEmailFormat => "Invalid email format".to_string(),
        ValidationError::InvalidCodeFormat => "Invalid verification code format".to_string(),
        ValidationError::DuplicateValue { field } => {
            if field == "email" {
                "Email already registered".to_string()
            } else {
                "Phone number already registered".to_string()
            }
        }
    };
    HttpResponse::BadRequest().json(serde_json::json!({ "message": message }))
}

fn verification_response(error: &VerificationError) -> HttpResponse {
    match error {
        VerificationError::AccountNotEligible => {
            HttpResponse::Unauthorized().json(serde_json::json!({
                "message": "Account not found or not verified",
            }))
        }
        VerificationError::RetryTooSoon { remaining_seconds } => {
            HttpResponse::TooManyRequests().json(serde_json::json!({
                "message": "Please wait before requesting a new code",
                "remainingTime": remaining_seconds,
            }))
        }
        VerificationError::NoVerificationInProgress => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "message": "No verification in progress for this number",
            }))
        }
        VerificationError::NoAttempt => HttpResponse::BadRequest().json(serde_json::json!({
            "message": "No verification code was requested for this number",
        })),
        VerificationError::WrongPurpose => HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Verification code does not match this flow",
        })),
        VerificationError::Expired => HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Verification code has expired",
        })),
        VerificationError::CodeMismatch => HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Invalid verification code",
        })),
    }
}

fn token_response(error: &TokenError) -> HttpResponse {
    // All token failures are a 403: the caller presented something, it
    // just does not hold up. 401 is reserved for no credentials at all.
    tracing::debug!(error = %error, "Rejected session token");
    HttpResponse::Forbidden().json(serde_json::json!({
        "message": "Invalid or expired token",
    }))
}
