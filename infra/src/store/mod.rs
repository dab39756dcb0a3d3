//! In-memory persistence.
//!
//! Each store guards its map with a single async mutex, which is what
//! gives the per-key atomicity the repository contracts require. At
//! this scale lock contention is not a concern; swapping in a real
//! database later means re-implementing the same traits, nothing more.

mod accounts;
mod subscriptions;
mod verification;

pub use accounts::MemoryAccountRepository;
pub use subscriptions::MemorySubscriptionProvider;
pub use verification::MemoryVerificationStore;
