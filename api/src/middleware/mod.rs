//! HTTP middleware: JWT session guard and CORS.

pub mod auth;
pub mod cors;
