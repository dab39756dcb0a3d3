use actix_web::{web, HttpResponse};
use validator::Validate;

use ql_core::repositories::{AccountRepository, SubscriptionProvider, VerificationStore};
use ql_core::services::verification::SmsNotifier;
use ql_shared::utils::phone::mask_phone;

use crate::app::AppState;
use crate::dto::auth::{CodeSentResponse, ResendCodeRequest};
use crate::handlers::{domain_error_response, request_validation_response};

/// Handler for POST /api/resend-code
///
/// Rotates the outstanding code for the given flow and re-sends it.
/// Subject to the per-number cooldown: inside the window the response
/// is a 429 carrying the seconds left. Resending never extends the
/// original expiry window.
pub async fn resend_code<A, V, N, P>(
    state: web::Data<AppState<A, V, N, P>>,
    request: web::Json<ResendCodeRequest>,
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

    tracing::info!(
        phone = %mask_phone(&request.phone_number),
        purpose = %request.purpose,
        "Processing resend request"
    );

    match state
        .auth
        .resend(&request.phone_number, request.purpose)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(CodeSentResponse::new(
            "Verification code resent",
            &request.phone_number,
        )),
        Err(error) => domain_error_response(&error),
    }
}
