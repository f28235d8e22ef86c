//! Session token service implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Claims, SessionToken, User};
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

use super::config::SessionServiceConfig;

/// Service for issuing and verifying session tokens
pub struct SessionService {
    config: SessionServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    /// Creates a new session service
    ///
    /// Time-based claims are checked against `clock` rather than by the JWT
    /// library, so sessions follow the same clock as code expiry.
    pub fn new(config: SessionServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Session lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.session_expiry_seconds
    }

    /// Issues a session token for a user
    ///
    /// # Returns
    ///
    /// * `Ok(SessionToken)` - The signed token and its lifetime
    /// * `Err(DomainError::Token)` - Signing failed
    pub fn issue(&self, user: &User) -> Result<SessionToken, DomainError> {
        let now = self.clock.now();
        let claims = Claims::for_session(
            user.id,
            user.email.clone(),
            now,
            self.config.session_expiry_seconds,
            &self.config.issuer,
            &self.config.audience,
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "session_sign_failed", "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })?;

        Ok(SessionToken {
            token,
            expires_in: self.config.session_expiry_seconds,
            expires_at: now + Duration::seconds(self.config.session_expiry_seconds),
        })
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, audience and lifetime are valid
    /// * `Err(DomainError::Token)` - Token is invalid, expired, or malformed
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let error = match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::InvalidClaims
                }
                _ => TokenError::InvalidTokenFormat,
            };
            DomainError::Token(error)
        })?;

        let claims = token_data.claims;
        let now = self.clock.now();
        if claims.is_expired_at(now) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }
        if now.timestamp() < claims.nbf {
            return Err(DomainError::Token(TokenError::TokenNotYetValid));
        }

        Ok(claims)
    }

    /// Verifies a token and extracts the user ID
    pub fn user_id(&self, token: &str) -> Result<Uuid, DomainError> {
        self.verify(token)?
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::FixedClock;
    use chrono::Utc;

    fn service(clock: &FixedClock) -> SessionService {
        SessionService::new(SessionServiceConfig::default(), Arc::new(clock.clone()))
    }

    #[test]
    fn test_issue_and_verify() {
        let clock = FixedClock::default();
        let service = service(&clock);
        let user = User::from_verified_email("a@b.com", Utc::now());

        let session = service.issue(&user).unwrap();
        assert_eq!(session.expires_in, 7 * 86400);

        let claims = service.verify(&session.token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(service.user_id(&session.token).unwrap(), user.id);
    }

    #[test]
    fn test_expired_session() {
        let clock = FixedClock::default();
        let service = service(&clock);
        let user = User::from_verified_email("a@b.com", Utc::now());
        let session = service.issue(&user).unwrap();

        clock.advance(Duration::days(7));
        assert!(matches!(
            service.verify(&session.token),
            Err(DomainError::Token(TokenError::TokenExpired))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let clock = FixedClock::default();
        let user = User::from_verified_email("a@b.com", Utc::now());
        let session = service(&clock).issue(&user).unwrap();

        let other = SessionService::new(
            SessionServiceConfig {
                jwt_secret: "another-secret".into(),
                ..Default::default()
            },
            Arc::new(clock),
        );
        assert!(matches!(
            other.verify(&session.token),
            Err(DomainError::Token(TokenError::InvalidSignature))
        ));
    }

    #[test]
    fn test_garbage_token() {
        let clock = FixedClock::default();
        assert!(matches!(
            service(&clock).verify("not.a.jwt"),
            Err(DomainError::Token(TokenError::InvalidTokenFormat))
        ));
    }
}
