//! # Infrastructure Layer
//!
//! Concrete implementations of the core layer's ports: in-memory
//! persistence for accounts and verification records, the subscription
//! projection source, and the SMS dispatch channel.
//!
//! Everything here is process-local. Accounts and outstanding codes
//! live in memory and vanish on restart; sessions survive restarts
//! because tokens are stateless and verified by signature alone.

/// In-memory stores backing the repository traits
pub mod store;

/// SMS dispatch implementations
pub mod sms;
