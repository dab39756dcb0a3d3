use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use ql_core::domain::entities::{Account, CodePurpose};
use ql_shared::utils::phone::is_valid_phone;

/// E.164 check shared with the domain layer, so the DTO boundary and
/// the services accept exactly the same numbers.
fn phone_format(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_format"))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    /// Full E.164 phone number, e.g. "+12025550123"
    #[validate(custom(function = "phone_format"))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(function = "phone_format"))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[validate(custom(function = "phone_format"))]
    pub phone_number: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResendCodeRequest {
    #[validate(custom(function = "phone_format"))]
    pub phone_number: String,

    /// Which flow the outstanding code belongs to ("signup" or "login");
    /// sent on the wire as `type`
    #[serde(rename = "type")]
    pub purpose: CodePurpose,
}

/// Acknowledgement for code-issuing endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSentResponse {
    pub message: String,
    pub phone_number: String,
}

impl CodeSentResponse {
    pub fn new(message: &str, phone_number: &str) -> Self {
        Self {
            message: message.to_string(),
            phone_number: phone_number.to_string(),
        }
    }
}

/// Successful verification: the session token and the account.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub message: String,
    pub token: String,
    pub user: AccountDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub phone_number: String,
    pub email: String,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            phone_number: account.phone.clone(),
            email: account.email.clone(),
        }
    }
}
