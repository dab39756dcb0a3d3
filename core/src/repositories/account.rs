//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository contract for `Account` persistence.
///
/// Phone number is the primary key; email is unique across accounts.
/// Implementations must make `create` and `update` atomic per key.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError>;

    /// Check whether any account holds the given email address.
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist a new account.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Overwrite an existing account.
    ///
    /// Returns `DomainError::NotFound` if no account exists for the
    /// entity's phone number.
    async fn update(&self, account: Account) -> Result<Account, DomainError>;
}
