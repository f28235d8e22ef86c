//! Outcomes of the verification service

use chrono::{DateTime, Utc};

/// Result of a code request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOtpOutcome {
    /// A new code was stored and emailed
    Sent {
        /// Normalized address the code went to
        email: String,
        /// When the code stops being accepted
        expires_at: DateTime<Utc>,
        /// Seconds until another code may be requested
        resend_after_seconds: i64,
        /// Provider message ID
        message_id: String,
    },
    /// A code was issued too recently; the live code is unchanged
    CoolingDown { retry_after_seconds: i64 },
}

/// Why a submitted code was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Malformed or wrong code
    Invalid,
    Expired,
    /// No live code for the address
    NotFound,
    /// The code was burned by too many failures
    AttemptsExhausted,
}

/// Result of a code verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOtpOutcome {
    /// The code matched and has been consumed
    Verified { email: String },
    Rejected {
        reason: RejectReason,
        /// Attempts left on the live code, when one remains
        remaining_attempts: Option<i32>,
    },
}

impl VerifyOtpOutcome {
    pub(crate) fn rejected(reason: RejectReason) -> Self {
        VerifyOtpOutcome::Rejected {
            reason,
            remaining_attempts: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOtpOutcome::Verified { .. })
    }
}
