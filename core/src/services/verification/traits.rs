//! External collaborator traits for the verification service.

use async_trait::async_trait;

/// Out-of-band code dispatch (SMS).
///
/// Dispatch is fire-and-forget from the verification service's
/// perspective: failures are logged, never surfaced to the caller,
/// and never block code issuance.
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    /// Send a verification code to a phone number.
    ///
    /// Returns a provider message id on success, or a provider error
    /// message on failure.
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String>;
}
