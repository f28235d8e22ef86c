//! Main verification service implementation

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use ouv_shared::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::OtpCode;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::{IssueOutcome, OtpRepository};
use crate::services::clock::Clock;

use super::config::VerificationServiceConfig;
use super::traits::EmailServiceTrait;
use super::types::{RejectReason, SendOtpOutcome, VerifyOtpOutcome};

/// Verification service for email one-time passcodes
pub struct VerificationService<E: EmailServiceTrait, R: OtpRepository> {
    /// Email service for dispatching codes
    email_service: Arc<E>,
    /// Store holding the live code of each address
    otp_repository: Arc<R>,
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<E: EmailServiceTrait, R: OtpRepository> VerificationService<E, R> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `email_service` - Email delivery implementation
    /// * `otp_repository` - Code store implementation
    /// * `clock` - Time source for expiry and cooldown
    /// * `config` - Service configuration
    pub fn new(
        email_service: Arc<E>,
        otp_repository: Arc<R>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            email_service,
            otp_repository,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Sanitize, lower-case and syntax-check an email address
    pub fn normalize(raw_email: &str) -> Result<String, ValidationError> {
        let email = normalize_email(raw_email);
        if email.is_empty() {
            return Err(ValidationError::required("email"));
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(email)
    }

    /// Issue a code for an address and email it
    ///
    /// This method:
    /// 1. Normalizes and validates the address
    /// 2. Atomically replaces the live code unless one was issued within the
    ///    cooldown window
    /// 3. Sends the code by email, removing it again if delivery fails
    ///
    /// # Returns
    ///
    /// * `Ok(SendOtpOutcome::Sent)` - Code stored and emailed
    /// * `Ok(SendOtpOutcome::CoolingDown)` - Too soon; the live code is untouched
    /// * `Err(DomainError)` - Validation, storage or delivery failure
    pub async fn send_code(&self, raw_email: &str) -> DomainResult<SendOtpOutcome> {
        let email = Self::normalize(raw_email)?;
        let masked = mask_email(&email);
        let now = self.clock.now();
        let cooldown = Duration::seconds(self.config.resend_cooldown_seconds);

        let candidate = OtpCode::issue(email.clone(), now, self.config.code_expiration_minutes);
        let otp = match self
            .otp_repository
            .issue_if_cooled_down(candidate, now - cooldown)
            .await?
        {
            IssueOutcome::Issued(otp) => otp,
            IssueOutcome::CoolingDown { issued_at } => {
                let retry_after_seconds = seconds_until(now, issued_at + cooldown);
                tracing::warn!(
                    email = %masked,
                    retry_after_seconds,
                    event = "otp_cooldown_active",
                    "Verification code requested during resend cooldown"
                );
                return Ok(SendOtpOutcome::CoolingDown { retry_after_seconds });
            }
        };

        tracing::info!(
            email = %masked,
            otp_id = %otp.id,
            event = "otp_issued",
            "Issued new verification code"
        );

        let message_id = match self
            .email_service
            .send_verification_code(&email, &otp.code, self.config.code_expiration_minutes)
            .await
        {
            Ok(message_id) => message_id,
            Err(reason) => {
                tracing::error!(
                    email = %masked,
                    provider = self.email_service.provider_name(),
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                // An undelivered code must not hold the cooldown.
                if let Err(e) = self.otp_repository.consume(&email, otp.id).await {
                    tracing::warn!(email = %masked, error = %e, "Failed to discard undelivered code");
                }
                return Err(AuthError::EmailDeliveryFailure { reason }.into());
            }
        };

        Ok(SendOtpOutcome::Sent {
            email,
            expires_at: otp.expires_at,
            resend_after_seconds: self.config.resend_cooldown_seconds,
            message_id,
        })
    }

    /// Check a submitted code against the live code of an address
    ///
    /// Wrong codes count against the code's attempt budget; once it is spent
    /// the code is deleted. A matching code is consumed, so it verifies at
    /// most once.
    pub async fn verify_code(&self, raw_email: &str, code: &str) -> DomainResult<VerifyOtpOutcome> {
        let email = Self::normalize(raw_email)?;
        let masked = mask_email(&email);
        let code = code.trim();

        if !OtpCode::is_well_formed(code) {
            tracing::warn!(
                email = %masked,
                code_length = code.len(),
                event = "invalid_code_format",
                "Malformed verification code submitted"
            );
            return Ok(VerifyOtpOutcome::rejected(RejectReason::Invalid));
        }

        let Some(otp) = self.otp_repository.find_by_email(&email).await? else {
            tracing::warn!(email = %masked, event = "otp_not_found", "No live verification code");
            return Ok(VerifyOtpOutcome::rejected(RejectReason::NotFound));
        };

        let now = self.clock.now();
        if otp.is_expired_at(now) {
            self.otp_repository.consume(&email, otp.id).await?;
            tracing::warn!(email = %masked, event = "otp_expired", "Verification code expired");
            return Ok(VerifyOtpOutcome::rejected(RejectReason::Expired));
        }

        if otp.remaining_attempts(self.config.max_attempts) == 0 {
            self.otp_repository.consume(&email, otp.id).await?;
            return Ok(self.exhausted(&masked));
        }

        if !otp.matches(code) {
            let mut otp = otp;
            otp.attempts = match self.otp_repository.record_failed_attempt(&email, otp.id).await? {
                Some(attempts) => attempts,
                None => return Ok(VerifyOtpOutcome::rejected(RejectReason::NotFound)),
            };

            let remaining = otp.remaining_attempts(self.config.max_attempts);
            if remaining == 0 {
                self.otp_repository.consume(&email, otp.id).await?;
                return Ok(self.exhausted(&masked));
            }

            tracing::warn!(
                email = %masked,
                remaining_attempts = remaining,
                event = "otp_verification_failed",
                "Verification code mismatch"
            );
            return Ok(VerifyOtpOutcome::Rejected {
                reason: RejectReason::Invalid,
                remaining_attempts: Some(remaining),
            });
        }

        // Losing the consume race means another request already used this code.
        if !self.otp_repository.consume(&email, otp.id).await? {
            tracing::warn!(email = %masked, event = "otp_already_used", "Verification code already consumed");
            return Ok(VerifyOtpOutcome::rejected(RejectReason::NotFound));
        }

        tracing::info!(email = %masked, event = "otp_verified_success", "Verification code accepted");
        Ok(VerifyOtpOutcome::Verified { email })
    }

    /// Delete every expired code, returning how many were removed
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let removed = self.otp_repository.purge_expired(self.clock.now()).await?;
        tracing::info!(removed, event = "otp_purge", "Purged expired verification codes");
        Ok(removed)
    }

    fn exhausted(&self, masked: &str) -> VerifyOtpOutcome {
        tracing::error!(
            email = %masked,
            event = "max_attempts_exceeded",
            "Verification attempts exhausted, code discarded"
        );
        VerifyOtpOutcome::Rejected {
            reason: RejectReason::AttemptsExhausted,
            remaining_attempts: Some(0),
        }
    }
}

/// Whole seconds from `now` until `until`, rounded up and at least one
fn seconds_until(now: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    let millis = (until - now).num_milliseconds();
    ((millis + 999) / 1000).max(1)
}
