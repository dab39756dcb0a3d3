//! Validation and formatting utilities

pub mod email;
pub mod phone;
