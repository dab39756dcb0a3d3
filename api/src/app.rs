//! Application state and factory.
//!
//! `create_app` assembles the Actix application over whatever concrete
//! store/notifier implementations the caller provides, which is what
//! lets the integration tests run the full HTTP stack against the
//! in-memory infrastructure.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use ql_core::repositories::{AccountRepository, SubscriptionProvider, VerificationStore};
use ql_core::services::auth::AuthService;
use ql_core::services::token::TokenService;
use ql_core::services::verification::SmsNotifier;

use crate::middleware::auth::JwtAuth;
use crate::middleware::cors::create_cors;
use crate::routes::auth::{
    login::login, resend_code::resend_code, signup::signup, verify_login::verify_login,
    verify_signup::verify_signup,
};
use crate::routes::subscription::subscription_status;

/// Shared services injected into every handler.
pub struct AppState<A, V, N, P>
where
    A: AccountRepository,
    V: VerificationStore,
    N: SmsNotifier,
    P: SubscriptionProvider,
{
    pub auth: Arc<AuthService<A, V, N>>,
    pub subscriptions: Arc<P>,
    pub tokens: Arc<TokenService>,
}

/// Create and configure the application with all dependencies.
pub fn create_app<A, V, N, P>(
    app_state: web::Data<AppState<A, V, N, P>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody<Error: std::fmt::Debug>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    V: VerificationStore + 'static,
    N: SmsNotifier + 'static,
    P: SubscriptionProvider + 'static,
{
    let tokens = Arc::clone(&app_state.tokens);
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        // Malformed or incomplete JSON bodies come back as a 400 with
        // the same {"message"} shape the domain errors use
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(serde_json::json!({ "message": message })),
            )
            .into()
        }))
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/signup", web::post().to(signup::<A, V, N, P>))
                .route("/verify-signup", web::post().to(verify_signup::<A, V, N, P>))
                .route("/login", web::post().to(login::<A, V, N, P>))
                .route("/verify-login", web::post().to(verify_login::<A, V, N, P>))
                .route("/resend-code", web::post().to(resend_code::<A, V, N, P>))
                .route(
                    "/subscription",
                    web::get()
                        .to(subscription_status::<A, V, N, P>)
                        .wrap(JwtAuth::new(tokens)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "quietline-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "message": "The requested resource was not found",
    }))
}
