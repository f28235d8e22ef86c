//! Authentication service module
//!
//! Ties email verification to sessions:
//! - Code requests are delegated to the verification service
//! - A verified code resolves (or lazily creates) the user and opens a session
//! - Bearer tokens are resolved back to users

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
