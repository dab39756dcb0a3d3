//! Authentication service implementation.

use std::sync::Arc;

use ql_shared::utils::email::is_valid_email;
use ql_shared::utils::phone::{is_valid_phone, mask_phone};

use crate::domain::entities::{Account, CodePurpose};
use crate::errors::{DomainResult, ValidationError, VerificationError};
use crate::repositories::{AccountRepository, VerificationStore};
use crate::services::token::TokenService;
use crate::services::verification::{SmsNotifier, VerificationService};

/// Result of a successful verification: the minted session token and
/// the account it is bound to.
#[derive(Debug, Clone)]
pub struct VerifiedSession {
    pub token: String,
    pub account: Account,
}

/// Orchestrates the two-step signup and login flows.
///
/// All input validation happens here, before any record or account is
/// created or overwritten.
pub struct AuthService<A, V, N>
where
    A: AccountRepository,
    V: VerificationStore,
    N: SmsNotifier,
{
    accounts: Arc<A>,
    verification: Arc<VerificationService<V, N>>,
    tokens: Arc<TokenService>,
}

impl<A, V, N> AuthService<A, V, N>
where
    A: AccountRepository,
    V: VerificationStore,
    N: SmsNotifier + 'static,
{
    pub fn new(
        accounts: Arc<A>,
        verification: Arc<VerificationService<V, N>>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            verification,
            tokens,
        }
    }

    /// Begin signup: create an unverified account and issue a signup
    /// code. Rejects malformed input and duplicate phone or email
    /// before touching any state.
    pub async fn signup(&self, email: &str, phone: &str) -> DomainResult<()> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmailFormat.into());
        }
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhoneFormat.into());
        }

        if self.accounts.find_by_phone(phone).await?.is_some() {
            return Err(ValidationError::DuplicateValue {
                field: "phoneNumber".to_string(),
            }
            .into());
        }
        if self.accounts.exists_by_email(email).await? {
            return Err(ValidationError::DuplicateValue {
                field: "email".to_string(),
            }
            .into());
        }

        self.accounts.create(Account::new(phone, email)).await?;
        self.verification.initiate(phone, CodePurpose::Signup).await?;

        tracing::info!(
            phone = %mask_phone(phone),
            event = "signup_started",
            "Created unverified account and issued signup code"
        );
        Ok(())
    }

    /// Complete signup: validate the code, mark the account verified,
    /// and mint a session token.
    pub async fn verify_signup(&self, phone: &str, code: &str) -> DomainResult<VerifiedSession> {
        let Some(mut account) = self.accounts.find_by_phone(phone).await? else {
            return Err(VerificationError::NoAttempt.into());
        };

        self.verification.verify(phone, code, CodePurpose::Signup).await?;

        account.verify();
        let account = self.accounts.update(account).await?;
        let token = self.tokens.issue(phone)?;

        tracing::info!(
            phone = %mask_phone(phone),
            event = "signup_verified",
            "Account verified, session issued"
        );
        Ok(VerifiedSession { token, account })
    }

    /// Begin login: the account must exist and be verified before a
    /// login code is issued.
    pub async fn login(&self, phone: &str) -> DomainResult<()> {
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhoneFormat.into());
        }

        match self.accounts.find_by_phone(phone).await? {
            Some(account) if account.verified => {}
            _ => return Err(VerificationError::AccountNotEligible.into()),
        }

        self.verification.initiate(phone, CodePurpose::Login).await?;

        tracing::info!(
            phone = %mask_phone(phone),
            event = "login_started",
            "Issued login code"
        );
        Ok(())
    }

    /// Complete login: validate the code and mint a session token.
    pub async fn verify_login(&self, phone: &str, code: &str) -> DomainResult<VerifiedSession> {
        let Some(account) = self.accounts.find_by_phone(phone).await? else {
            return Err(VerificationError::NoAttempt.into());
        };

        self.verification.verify(phone, code, CodePurpose::Login).await?;
        let token = self.tokens.issue(phone)?;

        tracing::info!(
            phone = %mask_phone(phone),
            event = "login_verified",
            "Login verified, session issued"
        );
        Ok(VerifiedSession { token, account })
    }

    /// Resend the outstanding code for a flow, subject to the cooldown.
    pub async fn resend(&self, phone: &str, purpose: CodePurpose) -> DomainResult<()> {
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhoneFormat.into());
        }
        self.verification.resend(phone, purpose).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use async_trait::async_trait;
    use ql_shared::config::{AuthConfig, VerificationConfig};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemAccounts {
        accounts: Mutex<HashMap<String, Account>>,
    }

    #[async_trait]
    impl AccountRepository for MemAccounts {
        async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
            Ok(self.accounts.lock().await.get(phone).cloned())
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
            Ok(self.accounts.lock().await.values().any(|a| a.email == email))
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

    #[derive(Default)]
    struct MemStore {
        records: Mutex<HashMap<String, crate::domain::entities::VerificationRecord>>,
    }

    #[async_trait]
    impl VerificationStore for MemStore {
        async fn get(
            &self,
            phone: &str,
        ) -> Result<Option<crate::domain::entities::VerificationRecord>, DomainError> {
            Ok(self.records.lock().await.get(phone).cloned())
        }

        async fn put(
            &self,
            record: crate::domain::entities::VerificationRecord,
        ) -> Result<(), DomainError> {
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
        ) -> Result<Option<crate::domain::entities::VerificationRecord>, DomainError> {
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
    const EMAIL: &str = "a@b.com";

    struct Fixture {
        accounts: Arc<MemAccounts>,
        store: Arc<MemStore>,
        auth: AuthService<MemAccounts, MemStore, NullNotifier>,
    }

    fn fixture() -> Fixture {
        let accounts = Arc::new(MemAccounts::default());
        let store = Arc::new(MemStore::default());
        let verification = Arc::new(VerificationService::new(
            Arc::clone(&store),
            Arc::new(NullNotifier),
            VerificationConfig::default(),
        ));
        let tokens = Arc::new(TokenService::new(&AuthConfig::new("test-secret")));
        let auth = AuthService::new(Arc::clone(&accounts), verification, tokens);
        Fixture {
            accounts,
            store,
            auth,
        }
    }

    async fn stored_code(store: &MemStore, phone: &str) -> String {
        store.get(phone).await.unwrap().unwrap().code
    }

    #[tokio::test]
    async fn test_signup_flow_end_to_end() {
        let fx = fixture();
        fx.auth.signup(EMAIL, PHONE).await.unwrap();

        let account = fx.accounts.find_by_phone(PHONE).await.unwrap().unwrap();
        assert!(!account.verified);

        let code = stored_code(&fx.store, PHONE).await;
        let session = fx.auth.verify_signup(PHONE, &code).await.unwrap();

        assert!(session.account.verified);
        assert_eq!(session.account.phone, PHONE);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_input_before_mutation() {
        let fx = fixture();

        let err = fx.auth.signup("not-an-email", PHONE).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidEmailFormat)
        ));

        let err = fx.auth.signup(EMAIL, "12025550123").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidPhoneFormat)
        ));

        // Nothing was created by the rejected attempts
        assert!(fx.accounts.find_by_phone(PHONE).await.unwrap().is_none());
        assert!(fx.store.get(PHONE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicates() {
        let fx = fixture();
        fx.auth.signup(EMAIL, PHONE).await.unwrap();

        let err = fx.auth.signup("other@b.com", PHONE).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::DuplicateValue { ref field }) if field == "phoneNumber"
        ));

        let err = fx.auth.signup(EMAIL, "+12025550199").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::DuplicateValue { ref field }) if field == "email"
        ));
    }

    #[tokio::test]
    async fn test_login_requires_verified_account() {
        let fx = fixture();

        // Unknown account
        let err = fx.auth.login(PHONE).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::AccountNotEligible)
        ));

        // Known but unverified account
        fx.auth.signup(EMAIL, PHONE).await.unwrap();
        let err = fx.auth.login(PHONE).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::AccountNotEligible)
        ));
    }

    #[tokio::test]
    async fn test_login_flow_end_to_end() {
        let fx = fixture();
        fx.auth.signup(EMAIL, PHONE).await.unwrap();
        let code = stored_code(&fx.store, PHONE).await;
        fx.auth.verify_signup(PHONE, &code).await.unwrap();

        fx.auth.login(PHONE).await.unwrap();
        let code = stored_code(&fx.store, PHONE).await;
        let session = fx.auth.verify_login(PHONE, &code).await.unwrap();

        assert_eq!(session.account.email, EMAIL);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_signup_code_cannot_complete_login() {
        let fx = fixture();
        fx.auth.signup(EMAIL, PHONE).await.unwrap();
        let code = stored_code(&fx.store, PHONE).await;

        let err = fx.auth.verify_login(PHONE, &code).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::WrongPurpose)
        ));
    }
}
