use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Email address that will receive the code
    #[validate(length(min = 1, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(min = 1, max = 16))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub success: bool,
    pub message: String,
    /// Seconds until another code may be requested
    pub resend_after: i64,
    pub expires_at: DateTime<Utc>,
}

/// Body of the 429 reply while the resend cooldown is active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitedResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    /// Seconds until another code may be requested
    pub retry_after: i64,
}
