//! Response helpers shared by the route handlers

pub mod error;

pub use error::{handle_domain_error, request_language, validation_error_response};
