//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{SessionToken, User};

/// Public view of a user returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub needs_accessibility: bool,
    pub accessibility_details: Option<String>,
    pub is_verified: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            needs_accessibility: user.needs_accessibility,
            accessibility_details: user.accessibility_details.clone(),
            is_verified: user.is_verified,
        }
    }
}

/// Authentication response returned after a successful code verification
///
/// Carries the session token, its lifetime and the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed session JWT
    pub token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// Session lifetime in seconds
    pub expires_in: i64,

    /// The authenticated user
    pub user: UserSummary,

    /// Whether the user record was created by this login
    pub is_new_user: bool,
}

impl AuthResponse {
    /// Creates an authentication response from a session and its user
    ///
    /// # Arguments
    ///
    /// * `session` - The issued session token
    /// * `user` - The user the session is bound to
    /// * `is_new_user` - Whether the user was created during this login
    pub fn from_session(session: SessionToken, user: &User, is_new_user: bool) -> Self {
        Self {
            token: session.token,
            token_type: "Bearer".to_string(),
            expires_in: session.expires_in,
            user: UserSummary::from(user),
            is_new_user,
        }
    }
}
