//! Session token claims for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const JWT_ISSUER: &str = "ouvidoria";
pub const JWT_AUDIENCE: &str = "ouvidoria-api";

/// Registered JWT claims plus the verified email; `sub` is the user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl Claims {
    /// Claims for a session opened at `now`, valid immediately
    pub fn for_session(
        user_id: Uuid,
        email: Option<String>,
        now: DateTime<Utc>,
        lifetime_seconds: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let expiry = now + Duration::seconds(lifetime_seconds);

        Self {
            sub: user_id.to_string(),
            email,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expired from the `exp` second onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// An issued session credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Signed JWT
    pub token: String,

    /// Lifetime in seconds from issuance
    pub expires_in: i64,

    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_claims() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = Claims::for_session(
            user_id,
            Some("a@b.com".into()),
            now,
            3600,
            JWT_ISSUER,
            JWT_AUDIENCE,
        );

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iss, "ouvidoria");
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::seconds(3600)));
    }

    #[test]
    fn test_invalid_subject() {
        let mut claims = Claims::for_session(
            Uuid::new_v4(),
            None,
            Utc::now(),
            60,
            JWT_ISSUER,
            JWT_AUDIENCE,
        );
        claims.sub = "not-a-uuid".into();
        assert!(claims.user_id().is_err());
    }
}
