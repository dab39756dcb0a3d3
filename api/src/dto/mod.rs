//! Request and response DTOs.
//!
//! Wire names are camelCase to match the mobile client.

pub mod auth;
