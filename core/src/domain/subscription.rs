//! Subscription status projection.
//!
//! The backend consumes subscription state, it does not own it. This is
//! the one canonical wire schema: the same shape is returned from
//! `GET /subscription` and fed to the access gate, re-derived on every
//! query rather than cached in the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only projection of an account's subscription state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    /// Whether a paid plan is currently active
    pub is_active: bool,

    /// Whether the account has ever held a paid plan above the basic tier
    pub has_history: bool,

    /// Plan tier name (e.g., "premium"), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Billing cadence (e.g., "monthly"), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,

    /// Next renewal date for an active plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_renewal: Option<DateTime<Utc>>,

    /// Display price (e.g., "$4.99"), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl SubscriptionStatus {
    /// An active subscription with plan details.
    pub fn active(category: impl Into<String>, variation: impl Into<String>) -> Self {
        Self {
            is_active: true,
            has_history: true,
            category: Some(category.into()),
            variation: Some(variation.into()),
            next_renewal: None,
            price: None,
        }
    }

    /// A lapsed subscription: not active, but with paid history.
    pub fn lapsed() -> Self {
        Self {
            is_active: false,
            has_history: true,
            category: None,
            variation: None,
            next_renewal: None,
            price: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let status = SubscriptionStatus::active("premium", "monthly");
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["isActive"], true);
        assert_eq!(json["hasHistory"], true);
        assert_eq!(json["category"], "premium");
        assert!(json.get("nextRenewal").is_none());
    }

    #[test]
    fn test_lapsed() {
        let status = SubscriptionStatus::lapsed();
        assert!(!status.is_active);
        assert!(status.has_history);
    }
}
