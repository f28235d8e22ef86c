//! Configuration for the verification service

use ouv_shared::OtpConfig;

use crate::domain::entities::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, RESEND_COOLDOWN_SECONDS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of failed verification attempts per code
    pub max_attempts: i32,
    /// Minimum seconds between code resend requests
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
        }
    }
}

impl From<&OtpConfig> for VerificationServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            max_attempts: config.max_attempts,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}
