use actix_web::{web, HttpResponse};
use validator::Validate;

use ql_core::repositories::{AccountRepository, SubscriptionProvider, VerificationStore};
use ql_core::services::verification::SmsNotifier;
use ql_shared::utils::phone::mask_phone;

use crate::app::AppState;
use crate::dto::auth::{AccountDto, SessionResponse, VerifyCodeRequest};
use crate::handlers::{domain_error_response, request_validation_response};

/// Handler for POST /api/verify-login
///
/// Confirms a login code and returns a fresh session token.
pub async fn verify_login<A, V, N, P>(
    state: web::Data<AppState<A, V, N, P>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    V: VerificationStore + 'static,
    N: SmsNotifier + 'static,
    P: SubscriptionProvider + 'static,
{
    if let Err(errors) = request.0.validate() {
        return request_validation_response(&errors);
    }

    tracing::info!(phone = %mask_phone(&request.phone_number), "Verifying login code");

    match state
        .auth
        .verify_login(&request.phone_number, &request.code)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(SessionResponse {
            message: "Login successful".to_string(),
            token: session.token,
            user: AccountDto::from(&session.account),
        }),
        Err(error) => domain_error_response(&error),
    }
}
