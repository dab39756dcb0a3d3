//! JWT session guard for protected routes.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! against the shared `TokenService`, and injects the session context
//! into request extensions for handlers to pick up.
//!
//! Two distinct rejections, which clients handle differently:
//! - no credentials at all: 401, the client should go to login
//! - credentials that do not verify: 403, the client should drop its
//!   stored token and then go to login

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;

use ql_core::services::token::TokenService;

/// Session context injected into authenticated requests.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Phone number the session token is bound to
    pub phone: String,
    /// Token id, for request tracing
    pub jti: String,
}

/// Middleware factory guarding routes with JWT verification.
pub struct JwtAuth {
    tokens: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "message": "Access token required",
                }));
                return Ok(req.into_response(response).map_into_right_body());
            };

            let claims = match tokens.verify(&token) {
                Ok(claims) => claims,
                Err(error) => {
                    tracing::debug!(error = %error, "Rejected session token");
                    let response = HttpResponse::Forbidden().json(serde_json::json!({
                        "message": "Invalid or expired token",
                    }));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            tracing::debug!(
                jti = %claims.jti,
                expires_at = ?claims.expires_at(),
                "Session token accepted"
            );

            req.extensions_mut().insert(SessionContext {
                phone: claims.phone().to_string(),
                jti: claims.jti.clone(),
            });

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("token_123".to_string()));

        let no_scheme = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&no_scheme), None);

        let no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&no_header), None);
    }
}
