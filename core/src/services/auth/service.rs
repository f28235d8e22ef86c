//! Main authentication service implementation

use std::sync::Arc;
use uuid::Uuid;

use ouv_shared::validation::mask_email;

use crate::domain::entities::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{OtpRepository, UserRepository};
use crate::services::clock::Clock;
use crate::services::session::SessionService;
use crate::services::verification::{
    EmailServiceTrait, RejectReason, SendOtpOutcome, VerificationService, VerifyOtpOutcome,
};

/// Authentication service for the email code login flow
pub struct AuthService<U, E, O>
where
    U: UserRepository,
    E: EmailServiceTrait,
    O: OtpRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Verification service for email code handling
    verification_service: Arc<VerificationService<E, O>>,
    /// Session token issuing and verification
    session_service: Arc<SessionService>,
    clock: Arc<dyn Clock>,
}

impl<U, E, O> AuthService<U, E, O>
where
    U: UserRepository,
    E: EmailServiceTrait,
    O: OtpRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `verification_service` - Service for email verification
    /// * `session_service` - Service for session tokens
    /// * `clock` - Time source
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<E, O>>,
        session_service: Arc<SessionService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            session_service,
            clock,
        }
    }

    /// Request a verification code for an email address
    pub async fn send_code(&self, email: &str) -> DomainResult<SendOtpOutcome> {
        self.verification_service.send_code(email).await
    }

    /// Exchange a verification code for a session
    ///
    /// This method:
    /// 1. Verifies and consumes the code
    /// 2. Resolves the user by email, creating a verified user on first login
    /// 3. Issues a session token bound to the user
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Session token and user
    /// * `Err(AuthError::InvalidVerificationCode)` - Wrong, expired or missing code
    /// * `Err(AuthError::MaxAttemptsExceeded)` - The code was burned
    pub async fn login_with_code(&self, email: &str, code: &str) -> DomainResult<AuthResponse> {
        let email = match self.verification_service.verify_code(email, code).await? {
            VerifyOtpOutcome::Verified { email } => email,
            VerifyOtpOutcome::Rejected {
                reason: RejectReason::AttemptsExhausted,
                ..
            } => return Err(AuthError::MaxAttemptsExceeded.into()),
            VerifyOtpOutcome::Rejected {
                remaining_attempts, ..
            } => {
                return Err(AuthError::InvalidVerificationCode { remaining_attempts }.into());
            }
        };

        let (user, is_new_user) = self
            .user_repository
            .upsert_verified_email(&email, self.clock.now())
            .await?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %user.id,
            is_new_user,
            event = "login_success",
            "User authenticated with email code"
        );

        let session = self.session_service.issue(&user)?;
        Ok(AuthResponse::from_session(session, &user, is_new_user))
    }

    /// Resolve the user behind a bearer token
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - Token valid and user exists
    /// * `Err(DomainError::Token)` - Token invalid or expired
    /// * `Err(AuthError::UserNotFound)` - User no longer exists
    pub async fn current_user(&self, token: &str) -> DomainResult<User> {
        let user_id = self.session_service.user_id(token)?;
        self.find_user(user_id).await
    }

    /// Load the user a verified session belongs to
    pub async fn find_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }
}
