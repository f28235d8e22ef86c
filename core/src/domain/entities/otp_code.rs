//! One-time passcode entity for email-based authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Minimum interval between two issuances for the same address
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Failed verification attempts before a code is burned
pub const MAX_ATTEMPTS: i32 = 5;

/// The single live one-time passcode of an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier of this issuance
    pub id: Uuid,

    /// Normalized (sanitized, lower-cased) email address
    pub email: String,

    /// The 6-digit code
    pub code: String,

    /// Failed verification attempts so far
    pub attempts: i32,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    /// Issues a fresh code for `email` at `now`, valid for `expiration_minutes`
    pub fn issue(email: impl Into<String>, now: DateTime<Utc>, expiration_minutes: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Draws a code uniformly from `[CODE_MIN, CODE_MAX]` using the OS CSPRNG
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Whether `input` has the shape of a code (six ASCII digits)
    pub fn is_well_formed(input: &str) -> bool {
        input.len() == CODE_LENGTH && input.bytes().all(|b| b.is_ascii_digit())
    }

    /// A code is expired from `expires_at` onwards (boundary inclusive)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, input: &str) -> bool {
        self.code.len() == input.len() && constant_time_eq(self.code.as_bytes(), input.as_bytes())
    }

    /// Attempts left before the code is burned
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempts).max(0)
    }
}
