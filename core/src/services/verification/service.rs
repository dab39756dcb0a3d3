//! Verification service implementation.

use std::sync::Arc;

use chrono::Utc;
use ql_shared::config::VerificationConfig;
use ql_shared::utils::phone::mask_phone;

use crate::domain::entities::verification_record::{CodePurpose, VerificationRecord, CODE_LENGTH};
use crate::errors::{DomainResult, ValidationError, VerificationError};
use crate::repositories::VerificationStore;

use super::traits::SmsNotifier;

/// Issues and validates short-lived numeric codes.
///
/// State machine per phone number:
/// `NoRecord -> Issued -> (Consumed | Expired | Overwritten)`, where
/// resend re-enters `Issued` with a rotated code and refreshed retry
/// clock but the original expiry clock.
pub struct VerificationService<V: VerificationStore, N: SmsNotifier> {
    store: Arc<V>,
    notifier: Arc<N>,
    config: VerificationConfig,
}

impl<V, N> VerificationService<V, N>
where
    V: VerificationStore,
    N: SmsNotifier + 'static,
{
    pub fn new(store: Arc<V>, notifier: Arc<N>, config: VerificationConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Issue a fresh code for a phone number, overwriting any prior
    /// record, and dispatch it out-of-band.
    ///
    /// Eligibility for `purpose = Login` (account exists and is
    /// verified) is the caller's responsibility; this service only
    /// manages the record lifecycle.
    pub async fn initiate(
        &self,
        phone: &str,
        purpose: CodePurpose,
    ) -> DomainResult<VerificationRecord> {
        let record = VerificationRecord::new(phone, purpose, Utc::now());
        self.store.put(record.clone()).await?;

        tracing::info!(
            phone = %mask_phone(phone),
            purpose = %purpose,
            event = "verification_initiated",
            "Issued verification code"
        );

        self.dispatch(&record);
        Ok(record)
    }

    /// Rotate and redispatch the outstanding code for a phone number.
    ///
    /// Fails if no verification is in progress, if the stored purpose
    /// differs from the requested one, or if the resend cooldown has
    /// not yet elapsed. The expiry clock is never reset by a resend.
    pub async fn resend(
        &self,
        phone: &str,
        purpose: CodePurpose,
    ) -> DomainResult<VerificationRecord> {
        let Some(mut record) = self.store.get(phone).await? else {
            return Err(VerificationError::NoVerificationInProgress.into());
        };

        if record.purpose != purpose {
            return Err(VerificationError::WrongPurpose.into());
        }

        let now = Utc::now();
        let remaining = record.cooldown_remaining(now, self.config.resend_cooldown_seconds);
        if remaining > 0 {
            tracing::warn!(
                phone = %mask_phone(phone),
                remaining_seconds = remaining,
                event = "resend_throttled",
                "Resend requested within cooldown"
            );
            return Err(VerificationError::RetryTooSoon {
                remaining_seconds: remaining,
            }
            .into());
        }

        record.rotate_code(now);
        self.store.put(record.clone()).await?;

        tracing::info!(
            phone = %mask_phone(phone),
            purpose = %purpose,
            event = "verification_resent",
            "Rotated and resent verification code"
        );

        self.dispatch(&record);
        Ok(record)
    }

    /// Validate a submitted code. The record is single-use: it is
    /// consumed atomically on success and on expiry detection, and left
    /// untouched on a mismatch.
    pub async fn verify(&self, phone: &str, code: &str, purpose: CodePurpose) -> DomainResult<()> {
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidCodeFormat.into());
        }

        let Some(record) = self.store.get(phone).await? else {
            return Err(VerificationError::NoAttempt.into());
        };

        if record.purpose != purpose {
            return Err(VerificationError::WrongPurpose.into());
        }

        if record.is_expired_at(Utc::now(), self.config.code_expiry_seconds) {
            self.store.delete(phone).await?;
            tracing::info!(
                phone = %mask_phone(phone),
                event = "verification_expired",
                "Verification code expired, record consumed"
            );
            return Err(VerificationError::Expired.into());
        }

        // Atomic compare-and-delete; a plain read-then-delete would let
        // two concurrent verify attempts both succeed.
        match self.store.compare_and_delete(phone, code).await? {
            Some(_) => {
                tracing::info!(
                    phone = %mask_phone(phone),
                    event = "verification_succeeded",
                    "Verification code accepted"
                );
                Ok(())
            }
            None => {
                // The record either held a different code or was
                // consumed concurrently since the read above.
                if self.store.get(phone).await?.is_some() {
                    Err(VerificationError::CodeMismatch.into())
                } else {
                    Err(VerificationError::NoAttempt.into())
                }
            }
        }
    }

    /// Fire-and-forget dispatch; delivery failures are logged, never
    /// propagated, and issuance never waits on the provider.
    fn dispatch(&self, record: &VerificationRecord) {
        let notifier = Arc::clone(&self.notifier);
        let phone = record.phone.clone();
        let code = record.code.clone();
        tokio::spawn(async move {
            if let Err(error) = notifier.send_code(&phone, &code).await {
                tracing::error!(
                    phone = %mask_phone(&phone),
                    error = %error,
                    event = "sms_dispatch_failed",
                    "Failed to dispatch verification code"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemStore {
        records: Mutex<HashMap<String, VerificationRecord>>,
    }

    #[async_trait]
    impl VerificationStore for MemStore {
        async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, DomainError> {
            Ok(self.records.lock().await.get(phone).cloned())
        }

        async fn put(&self, record: VerificationRecord) -> Result<(), DomainError> {
            self.records.lock().await.insert(record.phone.clone(), record);
            Ok(())
        }

        async fn delete(&self, phone: &str) -> Result<(), DomainError> {
            self.records.lock().await.remove(phone);
            Ok(())
        }

        async fn compare_and_delete(
            &self,
            phone: &str,
            code: &str,
        ) -> Result<Option<VerificationRecord>, DomainError> {
            let mut records = self.records.lock().await;
            match records.get(phone) {
                Some(record) if record.matches_code(code) => Ok(records.remove(phone)),
                _ => Ok(None),
            }
        }
    }

    struct NullNotifier;

    #[async_trait]
    impl SmsNotifier for NullNotifier {
        async fn send_code(&self, _phone: &str, _code: &str) -> Result<String, String> {
            Ok("test".to_string())
        }
    }

    const PHONE: &str = "+12025550123";

    fn service(store: Arc<MemStore>) -> VerificationService<MemStore, NullNotifier> {
        VerificationService::new(store, Arc::new(NullNotifier), VerificationConfig::default())
    }

    #[tokio::test]
    async fn test_initiate_then_verify_succeeds_exactly_once() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        let record = svc.initiate(PHONE, CodePurpose::Signup).await.unwrap();
        svc.verify(PHONE, &record.code, CodePurpose::Signup).await.unwrap();

        // Record consumed; replaying the same code finds nothing
        let err = svc
            .verify(PHONE, &record.code, CodePurpose::Signup)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::NoAttempt)
        ));
    }

    #[tokio::test]
    async fn test_wrong_code_leaves_record_intact() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        let record = svc.initiate(PHONE, CodePurpose::Signup).await.unwrap();
        let wrong = if record.code == "111111" { "222222" } else { "111111" };

        let err = svc.verify(PHONE, wrong, CodePurpose::Signup).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::CodeMismatch)
        ));

        // The correct code still works afterwards
        svc.verify(PHONE, &record.code, CodePurpose::Signup).await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_wrong_purpose() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        let record = svc.initiate(PHONE, CodePurpose::Signup).await.unwrap();
        let err = svc
            .verify(PHONE, &record.code, CodePurpose::Login)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::WrongPurpose)
        ));
    }

    #[tokio::test]
    async fn test_verify_without_record() {
        let svc = service(Arc::new(MemStore::default()));
        let err = svc.verify(PHONE, "123456", CodePurpose::Login).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::NoAttempt)
        ));
    }

    #[tokio::test]
    async fn test_malformed_code_rejected_before_lookup() {
        let svc = service(Arc::new(MemStore::default()));
        for bad in ["12345", "1234567", "12345a", ""] {
            let err = svc.verify(PHONE, bad, CodePurpose::Signup).await.unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ValidationError::InvalidCodeFormat)
            ));
        }
    }

    #[tokio::test]
    async fn test_expired_code_is_consumed() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        let mut record = VerificationRecord::new(PHONE, CodePurpose::Signup, Utc::now());
        record.issued_at = Utc::now() - Duration::seconds(301);
        let code = record.code.clone();
        store.put(record).await.unwrap();

        let err = svc.verify(PHONE, &code, CodePurpose::Signup).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::Expired)
        ));

        // Expiry detection deleted the record
        assert!(store.get(PHONE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resend_within_cooldown() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        svc.initiate(PHONE, CodePurpose::Login).await.unwrap();
        let err = svc.resend(PHONE, CodePurpose::Login).await.unwrap_err();

        match err {
            DomainError::Verification(VerificationError::RetryTooSoon { remaining_seconds }) => {
                assert!(remaining_seconds > 0 && remaining_seconds <= 60);
            }
            other => panic!("expected RetryTooSoon, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resend_after_cooldown_rotates_code_only() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        let issued = svc.initiate(PHONE, CodePurpose::Login).await.unwrap();

        // Age the retry clock past the cooldown without touching issuance
        let mut aged = store.get(PHONE).await.unwrap().unwrap();
        aged.last_retry_at = aged.last_retry_at - Duration::seconds(61);
        store.put(aged).await.unwrap();

        let resent = svc.resend(PHONE, CodePurpose::Login).await.unwrap();
        assert_eq!(resent.issued_at, issued.issued_at);
        assert!(resent.last_retry_at > issued.last_retry_at);
    }

    #[tokio::test]
    async fn test_resend_without_record() {
        let svc = service(Arc::new(MemStore::default()));
        let err = svc.resend(PHONE, CodePurpose::Signup).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::NoVerificationInProgress)
        ));
    }

    #[tokio::test]
    async fn test_resend_purpose_mismatch_rejected() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        let issued = svc.initiate(PHONE, CodePurpose::Signup).await.unwrap();
        let err = svc.resend(PHONE, CodePurpose::Login).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::WrongPurpose)
        ));

        // Rejected before any rotation
        let stored = store.get(PHONE).await.unwrap().unwrap();
        assert_eq!(stored.code, issued.code);
    }

    #[tokio::test]
    async fn test_reinitiate_invalidates_previous_code() {
        let store = Arc::new(MemStore::default());
        let svc = service(Arc::clone(&store));

        let first = svc.initiate(PHONE, CodePurpose::Signup).await.unwrap();
        let second = svc.initiate(PHONE, CodePurpose::Signup).await.unwrap();

        if first.code != second.code {
            let err = svc
                .verify(PHONE, &first.code, CodePurpose::Signup)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DomainError::Verification(VerificationError::CodeMismatch)
            ));
        }
        svc.verify(PHONE, &second.code, CodePurpose::Signup).await.unwrap();
    }
}
