//! Console SMS notifier for development and testing.
//!
//! Logs verification codes instead of sending them, so the two-step
//! flows can be exercised end to end without a provider account.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use ql_core::services::verification::SmsNotifier;
use ql_shared::utils::phone::mask_phone;

/// Development notifier that prints codes to the console.
#[derive(Clone)]
pub struct ConsoleSmsNotifier {
    /// Messages dispatched since construction
    message_count: Arc<AtomicU64>,
    /// Fail every send, for exercising the dispatch failure path
    simulate_failure: bool,
    /// Print the full code to stdout (off in tests)
    console_output: bool,
}

impl ConsoleSmsNotifier {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Total messages dispatched so far.
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleSmsNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsNotifier for ConsoleSmsNotifier {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String> {
        let masked = mask_phone(phone);

        if self.simulate_failure {
            warn!(phone = %masked, "Console notifier simulating dispatch failure");
            return Err("simulated SMS dispatch failure".to_string());
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("[sms #{count}] to {phone}: your verification code is {code}");
        }

        info!(
            target: "sms",
            provider = "console",
            phone = %masked,
            message_id = %message_id,
            "Verification code dispatched"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "+12025550123";

    #[tokio::test]
    async fn test_send_returns_message_id_and_counts() {
        let notifier = ConsoleSmsNotifier::with_options(false, false);

        let id = notifier.send_code(PHONE, "123456").await.unwrap();
        assert!(id.starts_with("console_"));
        assert_eq!(notifier.message_count(), 1);

        notifier.send_code(PHONE, "654321").await.unwrap();
        assert_eq!(notifier.message_count(), 2);
    }

    #[tokio::test]
    async fn test_simulated_failure_sends_nothing() {
        let notifier = ConsoleSmsNotifier::with_options(false, true);

        let err = notifier.send_code(PHONE, "123456").await.unwrap_err();
        assert!(err.contains("failure"));
        assert_eq!(notifier.message_count(), 0);
    }
}
