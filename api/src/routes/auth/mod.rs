//! Authentication routes: the two-step signup and login flows plus
//! code resend.

pub mod login;
pub mod resend_code;
pub mod signup;
pub mod verify_login;
pub mod verify_signup;
