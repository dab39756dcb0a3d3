//! # API Layer
//!
//! HTTP surface of the Quietline backend: request/response DTOs,
//! route handlers, the JWT guard for protected routes, and the
//! application factory that wires the service stack together.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
