//! Verification service module for email one-time passcodes
//!
//! Issues codes under a resend cooldown, dispatches them by email and checks
//! submitted codes with attempt tracking and single-use consumption.

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::EmailServiceTrait;
pub use types::{RejectReason, SendOtpOutcome, VerifyOtpOutcome};
