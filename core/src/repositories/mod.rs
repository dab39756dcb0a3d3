//! Repository interfaces for persistence and external projections.
//!
//! Implementations live in the infrastructure layer; the domain depends
//! only on these contracts so backing stores are swappable and services
//! are testable without global state.

mod account;
mod subscription;
mod verification;

pub use account::AccountRepository;
pub use subscription::SubscriptionProvider;
pub use verification::VerificationStore;
