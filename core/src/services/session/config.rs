//! Configuration for the session service

use ouv_shared::JwtConfig;

use crate::domain::entities::{JWT_AUDIENCE, JWT_ISSUER};

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Session lifetime in seconds
    pub session_expiry_seconds: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            session_expiry_seconds: 7 * 86400,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}

impl From<&JwtConfig> for SessionServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            session_expiry_seconds: config.session_expiry,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
