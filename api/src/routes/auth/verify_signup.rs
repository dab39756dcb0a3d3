use actix_web::{web, HttpResponse};
use validator::Validate;

use ql_core::repositories::{AccountRepository, SubscriptionProvider, VerificationStore};
use ql_core::services::verification::SmsNotifier;
use ql_shared::utils::phone::mask_phone;

use crate::app::AppState;
use crate::dto::auth::{AccountDto, SessionResponse, VerifyCodeRequest};
use crate::handlers::{domain_error_response, request_validation_response};

/// Handler for POST /api/verify-signup
///
/// Confirms a signup code, marks the account verified, and returns the
/// session token. The code is single-use: success or expiry consumes it.
pub async fn verify_signup<A, V, N, P>(
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

    tracing::info!(phone = %mask_phone(&request.phone_number), "Verifying signup code");

    match state
        .auth
        .verify_signup(&request.phone_number, &request.code)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(SessionResponse {
            message: "Account verified".to_string(),
            token: session.token,
            user: AccountDto::from(&session.account),
        }),
        Err(error) => domain_error_response(&error),
    }
}
