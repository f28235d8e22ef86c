//! Request and response bodies

pub mod auth;
pub mod manifestation;
pub mod user;

pub use auth::{RateLimitedResponse, SendCodeRequest, SendCodeResponse, VerifyCodeRequest};
pub use manifestation::{ManifestationResponse, SubmitManifestationRequest};
pub use user::RegisterRequest;
