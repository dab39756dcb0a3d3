//! Subscription status route.

use actix_web::{web, HttpResponse};

use ql_core::repositories::{AccountRepository, SubscriptionProvider, VerificationStore};
use ql_core::services::verification::SmsNotifier;
use ql_shared::utils::phone::mask_phone;

use crate::app::AppState;
use crate::handlers::domain_error_response;
use crate::middleware::auth::SessionContext;

/// Handler for GET /api/subscription (JWT-protected)
///
/// Returns the freshly fetched subscription projection for the session's
/// account, or JSON `null` when the account has no subscription record.
/// Clients must not cache this across navigations.
pub async fn subscription_status<A, V, N, P>(
    session: SessionContext,
    state: web::Data<AppState<A, V, N, P>>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    V: VerificationStore + 'static,
    N: SmsNotifier + 'static,
    P: SubscriptionProvider + 'static,
{
    tracing::debug!(phone = %mask_phone(&session.phone), "Fetching subscription status");

    match state.subscriptions.status_for(&session.phone).await {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(error) => domain_error_response(&error),
    }
}
