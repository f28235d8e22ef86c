//! One-time passcode configuration

use serde::{Deserialize, Serialize};

/// Issuance and verification limits for email one-time passcodes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a code stays valid after issuance
    #[serde(default = "default_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Minimum seconds between two issuances for the same address
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: i64,

    /// Failed verification attempts before a code is burned
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_expiration_minutes(),
            resend_cooldown_seconds: default_resend_cooldown(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_expiration_minutes() -> i64 {
    15
}

fn default_resend_cooldown() -> i64 {
    60
}

fn default_max_attempts() -> i32 {
    5
}
