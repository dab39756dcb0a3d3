//! In-memory verification record store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ql_core::domain::entities::VerificationRecord;
use ql_core::errors::DomainError;
use ql_core::repositories::VerificationStore;

/// One outstanding record per phone number, overwrite on re-issue.
///
/// The whole map sits behind one mutex, so `compare_and_delete` is a
/// genuine atomic check-and-remove: two concurrent verify attempts for
/// the same phone can never both take the record.
#[derive(Default)]
pub struct MemoryVerificationStore {
    records: Mutex<HashMap<String, VerificationRecord>>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, DomainError> {
        Ok(self.records.lock().await.get(phone).cloned())
    }

    async fn put(&self, record: VerificationRecord) -> Result<(), DomainError> {
        self.records
            .lock()
            .await
            .insert(record.phone.clone(), record);
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
