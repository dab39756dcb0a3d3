//! Quietline API server entry point.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing_subscriber::EnvFilter;

use ql_api::app::{create_app, AppState};
use ql_core::services::auth::AuthService;
use ql_core::services::token::TokenService;
use ql_core::services::verification::VerificationService;
use ql_infra::sms::ConsoleSmsNotifier;
use ql_infra::store::{
    MemoryAccountRepository, MemorySubscriptionProvider, MemoryVerificationStore,
};
use ql_shared::config::{AuthConfig, ServerConfig, VerificationConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let server_config = ServerConfig::from_env();
    let auth_config = AuthConfig::from_env();
    let verification_config = VerificationConfig::from_env();

    if auth_config.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the insecure development default");
    }

    let accounts = Arc::new(MemoryAccountRepository::new());
    let store = Arc::new(MemoryVerificationStore::new());
    let subscriptions = Arc::new(MemorySubscriptionProvider::new());
    let notifier = Arc::new(ConsoleSmsNotifier::new());

    let tokens = Arc::new(TokenService::new(&auth_config));
    let verification = Arc::new(VerificationService::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        verification_config,
    ));
    let auth = Arc::new(AuthService::new(
        Arc::clone(&accounts),
        verification,
        Arc::clone(&tokens),
    ));

    let app_state = web::Data::new(AppState {
        auth,
        subscriptions,
        tokens,
    });

    let bind_address = server_config.bind_address();
    tracing::info!(%bind_address, "Starting Quietline API server");

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
