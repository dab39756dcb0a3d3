use actix_web::{web, HttpResponse};
use validator::Validate;

use ql_core::repositories::{AccountRepository, SubscriptionProvider, VerificationStore};
use ql_core::services::verification::SmsNotifier;
use ql_shared::utils::phone::mask_phone;

use crate::app::AppState;
use crate::dto::auth::{CodeSentResponse, SignupRequest};
use crate::handlers::{domain_error_response, request_validation_response};

/// Handler for POST /api/signup
///
/// Creates an unverified account and sends a signup verification code.
/// Returns 201 with the echoed phone number; the account stays
/// unverified until the code is confirmed.
pub async fn signup<A, V, N, P>(
    state: web::Data<AppState<A, V, N, P>>,
    request: web::Json<SignupRequest>,
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

    tracing::info!(phone = %mask_phone(&request.phone_number), "Processing signup request");

    match state.auth.signup(&request.email, &request.phone_number).await {
        Ok(()) => HttpResponse::Created().json(CodeSentResponse::new(
            "Verification code sent",
            &request.phone_number,
        )),
        Err(error) => domain_error_response(&error),
    }
}
