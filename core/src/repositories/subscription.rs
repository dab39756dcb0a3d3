//! Subscription projection provider trait.

use async_trait::async_trait;

use crate::domain::subscription::SubscriptionStatus;
use crate::errors::DomainError;

/// Read-only access to an account's subscription state.
///
/// The projection is fetched fresh per query; callers must not cache it
/// across navigations since it can change out-of-band (e.g., a payment
/// webhook on the billing side).
#[async_trait]
pub trait SubscriptionProvider: Send + Sync {
    /// The subscription status for an account, `None` if the account
    /// has no subscription record at all.
    async fn status_for(&self, phone: &str) -> Result<Option<SubscriptionStatus>, DomainError>;
}
