//! Session token module
//!
//! Issues and verifies the HS256-signed JWT that binds a request to a user.

mod config;
mod service;

pub use config::SessionServiceConfig;
pub use service::SessionService;
