//! CORS configuration for the mobile and web clients.
//!
//! Development is permissive so emulators and local web builds can hit
//! the API freely; production restricts origins to the configured list.
//!
//! Environment variables:
//! - `ENVIRONMENT`: "production" switches to the restrictive policy
//! - `ALLOWED_ORIGINS`: comma-separated origin list (production only)
//! - `CORS_MAX_AGE`: preflight cache seconds (default 3600)

use std::env;

use actix_cors::Cors;
use actix_web::http::{header, Method};

pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(3600);

    if environment == "production" {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::info!("Configuring CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(max_age)
}

fn create_production_cors(max_age: usize) -> Cors {
    tracing::info!("Configuring CORS for production");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(max_age);

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(|origin| origin.trim()) {
            if !origin.is_empty() {
                tracing::info!(origin, "Allowing origin");
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}
