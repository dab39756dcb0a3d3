//! # Quietline Core
//!
//! Core business logic and domain layer for the Quietline backend.
//! This crate contains domain entities, the verification and session
//! services, repository interfaces, the settings-route access gate,
//! and error types that form the foundation of the application.

pub mod domain;
pub mod errors;
pub mod gate;
pub mod repositories;
pub mod services;
