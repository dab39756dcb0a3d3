//! Shared handler support: the domain-error-to-HTTP mapping.

pub mod error;

pub use error::{domain_error_response, request_validation_response};
