//! Verification service: issues, resends, validates, and expires the
//! one-time codes gating signup and login.

mod service;
mod traits;

pub use service::VerificationService;
pub use traits::SmsNotifier;
