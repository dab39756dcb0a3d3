use actix_web::{web, HttpResponse};
use validator::Validate;

use ql_core::repositories::{AccountRepository, SubscriptionProvider, VerificationStore};
use ql_core::services::verification::SmsNotifier;
use ql_shared::utils::phone::mask_phone;

use crate::app::AppState;
use crate::dto::auth::{CodeSentResponse, LoginRequest};
use crate::handlers::{domain_error_response, request_validation_response};

/// Handler for POST /api/login
///
/// Sends a login verification code. The account must already exist and
/// be verified; otherwise a 401 comes back and no code is issued.
pub async fn login<A, V, N, P>(
    state: web::Data<AppState<A, V, N, P>>,
    request: web::Json<LoginRequest>,
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

    tracing::info!(phone = %mask_phone(&request.phone_number), "Processing login request");

    match state.auth.login(&request.phone_number).await {
        Ok(()) => HttpResponse::Ok().json(CodeSentResponse::new(
            "Verification code sent",
            &request.phone_number,
        )),
        Err(error) => domain_error_response(&error),
    }
}
