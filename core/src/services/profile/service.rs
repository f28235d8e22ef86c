//! Profile registration service

use std::sync::Arc;

use ouv_shared::validation::{char_len, is_valid_email, mask_email, normalize_email, sanitize_input};

use crate::domain::entities::{User, UserProfile};
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::clock::Clock;

/// Longest accepted display name, in characters
pub const NAME_MAX_CHARS: usize = 200;

/// Longest accepted accessibility description, in characters
const DETAILS_MAX_CHARS: usize = 1000;

/// Raw registration data as received from a client
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub needs_accessibility: bool,
    pub accessibility_details: Option<String>,
}

/// Registers citizens, by email or anonymously
pub struct ProfileService<U: UserRepository> {
    user_repository: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U: UserRepository> ProfileService<U> {
    pub fn new(user_repository: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repository,
            clock,
        }
    }

    /// Create or update a user profile
    ///
    /// With an email the profile is upserted onto the user owning that
    /// address; without one a new anonymous user is inserted.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::ValidationErr)` - Malformed email or oversized fields
    pub async fn register(&self, input: RegisterInput) -> DomainResult<User> {
        let profile = Self::profile_from(&input)?;
        let now = self.clock.now();

        let email = input
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty());

        match email {
            Some(email) => {
                if !is_valid_email(&email) {
                    return Err(ValidationError::InvalidEmail.into());
                }
                let user = self
                    .user_repository
                    .upsert_profile_by_email(&email, profile, now)
                    .await?;
                tracing::info!(
                    email = %mask_email(&email),
                    user_id = %user.id,
                    event = "profile_registered",
                    "Registered profile by email"
                );
                Ok(user)
            }
            None => {
                let user = self
                    .user_repository
                    .create(User::anonymous(profile, now))
                    .await?;
                tracing::info!(user_id = %user.id, event = "anonymous_registered", "Registered anonymous user");
                Ok(user)
            }
        }
    }

    fn profile_from(input: &RegisterInput) -> Result<UserProfile, ValidationError> {
        let name = input.name.as_deref().map(sanitize_input);
        if let Some(name) = &name {
            check_max("name", name, NAME_MAX_CHARS)?;
        }

        let details = input.accessibility_details.as_deref().map(sanitize_input);
        if let Some(details) = &details {
            check_max("accessibility_details", details, DETAILS_MAX_CHARS)?;
        }

        Ok(UserProfile::new(name, input.needs_accessibility, details))
    }
}

fn check_max(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = char_len(value);
    if actual > max {
        return Err(ValidationError::InvalidLength {
            field: field.to_string(),
            min: 0,
            max,
            actual,
        });
    }
    Ok(())
}
