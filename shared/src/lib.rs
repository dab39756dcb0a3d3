//! # Quietline Shared
//!
//! Configuration and validation utilities shared across the Quietline backend
//! crates. This crate sits at the bottom of the workspace and depends on no
//! other member.

pub mod config;
pub mod utils;
