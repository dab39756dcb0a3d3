//! Error type definitions for verification, token, and validation
//! failures. User-facing messages are assembled at the HTTP boundary;
//! these variants carry only what the mapping needs.

use thiserror::Error;

/// Verification flow errors
///
/// Each variant corresponds to one observable failure of the
/// initiate / resend / verify lifecycle.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerificationError {
    /// Login verification requested for an account that does not exist
    /// or has never completed signup verification
    #[error("Account not eligible for login")]
    AccountNotEligible,

    /// Resend requested with no outstanding record for the phone number
    #[error("No verification in progress")]
    NoVerificationInProgress,

    /// Resend requested before the cooldown elapsed
    #[error("Retry too soon, {remaining_seconds}s remaining")]
    RetryTooSoon { remaining_seconds: i64 },

    /// Verify requested with no outstanding record for the phone number
    #[error("No verification attempt found")]
    NoAttempt,

    /// Stored purpose differs from the requested purpose
    #[error("Verification purpose mismatch")]
    WrongPurpose,

    /// Code past its validity window; the record has been consumed
    #[error("Verification code expired")]
    Expired,

    /// Submitted code does not equal the stored code
    #[error("Verification code mismatch")]
    CodeMismatch,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
///
/// All validation happens at the boundary, before any state mutation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid phone number format")]
    InvalidPhoneFormat,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Invalid verification code format")]
    InvalidCodeFormat,

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },
}
