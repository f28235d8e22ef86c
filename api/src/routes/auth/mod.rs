//! Authentication route handlers
//!
//! - Sending a verification code by email
//! - Exchanging the code for a session
//! - Reading the user behind the session

pub mod me;
pub mod send_code;
pub mod verify_code;

pub use me::me;
pub use send_code::send_code;
pub use verify_code::verify_code;
