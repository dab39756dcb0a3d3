//! Session token service: stateless JWT issuance and verification.

mod service;

pub use service::TokenService;
