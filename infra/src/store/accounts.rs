//! In-memory account repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ql_core::domain::entities::Account;
use ql_core::errors::DomainError;
use ql_core::repositories::AccountRepository;

/// Account storage keyed by phone number.
///
/// Email uniqueness is checked by scanning values; acceptable for an
/// in-memory store, a real database would carry a unique index.
#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts. Test and diagnostics helper.
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.lock().await.get(phone).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self
            .accounts
            .lock()
            .await
            .values()
            .any(|account| account.email == email))
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        self.accounts
            .lock()
            .await
            .insert(account.phone.clone(), account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.lock().await;
        if !accounts.contains_key(&account.phone) {
            return Err(DomainError::NotFound {
                resource: "account".to_string(),
            });
        }
        accounts.insert(account.phone.clone(), account.clone());
        Ok(account)
    }
}
