//! In-memory subscription projection source.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ql_core::domain::subscription::SubscriptionStatus;
use ql_core::errors::DomainError;
use ql_core::repositories::SubscriptionProvider;

/// Subscription state keyed by phone number.
///
/// Stands in for the billing system's projection feed. `upsert` is how
/// that feed (or a test) pushes state changes in; reads always reflect
/// the latest pushed state, which is why callers must not cache the
/// answer across navigations.
#[derive(Default)]
pub struct MemorySubscriptionProvider {
    statuses: Mutex<HashMap<String, SubscriptionStatus>>,
}

impl MemorySubscriptionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace the subscription state for an account.
    pub async fn upsert(&self, phone: &str, status: SubscriptionStatus) {
        self.statuses
            .lock()
            .await
            .insert(phone.to_string(), status);
    }

    /// Drop the subscription record for an account entirely.
    pub async fn remove(&self, phone: &str) {
        self.statuses.lock().await.remove(phone);
    }
}

#[async_trait]
impl SubscriptionProvider for MemorySubscriptionProvider {
    async fn status_for(&self, phone: &str) -> Result<Option<SubscriptionStatus>, DomainError> {
        Ok(self.statuses.lock().await.get(phone).cloned())
    }
}
