//! Domain entities

pub mod account;
pub mod token;
pub mod verification_record;

pub use account::Account;
pub use token::Claims;
pub use verification_record::{CodePurpose, VerificationRecord};
