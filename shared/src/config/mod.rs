//! Environment-driven configuration for the Quietline backend.

mod auth;
mod server;
mod verification;

pub use auth::AuthConfig;
pub use server::ServerConfig;
pub use verification::VerificationConfig;
