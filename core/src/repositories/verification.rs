//! Verification record store trait.

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

/// Keyed store for verification records: at most one live record per
/// phone number, overwrite semantics, single-key atomicity.
///
/// `compare_and_delete` exists so that verification is a single atomic
/// read-check-remove: a concurrent duplicate verify attempt for the
/// same phone number can never both succeed.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Fetch the outstanding record for a phone number, if any.
    async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, DomainError>;

    /// Store a record, overwriting any prior record for the same phone.
    async fn put(&self, record: VerificationRecord) -> Result<(), DomainError>;

    /// Remove the record for a phone number, if present.
    async fn delete(&self, phone: &str) -> Result<(), DomainError>;

    /// Atomically remove and return the record only if its stored code
    /// equals `code`. Returns `None` when there is no record or the
    /// code differs; in the latter case the record is left untouched.
    async fn compare_and_delete(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<Option<VerificationRecord>, DomainError>;
}
