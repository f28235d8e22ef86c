//! Repository interfaces, with in-memory implementations for tests and
//! local development.

pub mod manifestation;
pub mod otp;
pub mod user;

pub use manifestation::{ManifestationRepository, MockManifestationRepository};
pub use otp::{IssueOutcome, MockOtpRepository, OtpRepository};
pub use user::{MockUserRepository, UserRepository};
