//! Authentication orchestration: signup, login, and the verification
//! handoff that mints session tokens.

mod service;

pub use service::{AuthService, VerifiedSession};
