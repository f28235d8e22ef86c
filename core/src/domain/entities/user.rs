//! User entity representing a citizen of the Ouvidoria portal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile data supplied on registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, already sanitized
    pub name: Option<String>,

    /// Whether the citizen asked for accessibility support
    pub needs_accessibility: bool,

    /// Free-text description of the support needed
    pub accessibility_details: Option<String>,
}

impl UserProfile {
    /// Builds a profile, dropping details when no support was requested
    pub fn new(
        name: Option<String>,
        needs_accessibility: bool,
        accessibility_details: Option<String>,
    ) -> Self {
        let accessibility_details = if needs_accessibility {
            accessibility_details.filter(|d| !d.is_empty())
        } else {
            None
        };

        Self {
            name: name.filter(|n| !n.is_empty()),
            needs_accessibility,
            accessibility_details,
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized email address, absent for anonymous users
    pub email: Option<String>,

    /// Display name
    pub name: Option<String>,

    /// Whether the user needs accessibility support
    pub needs_accessibility: bool,

    /// Details of the accessibility support needed
    pub accessibility_details: Option<String>,

    /// Whether the email address has been proven by a one-time code
    pub is_verified: bool,

    /// When the email address was first verified
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A user created by the first successful code verification
    pub fn from_verified_email(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: Some(email.into()),
            name: None,
            needs_accessibility: false,
            accessibility_details: None,
            is_verified: true,
            email_verified_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// A user registered with a profile, optionally bound to an email
    pub fn registered(email: Option<String>, profile: UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name: profile.name,
            needs_accessibility: profile.needs_accessibility,
            accessibility_details: profile.accessibility_details,
            is_verified: false,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A user without email
    pub fn anonymous(profile: UserProfile, now: DateTime<Utc>) -> Self {
        Self::registered(None, profile, now)
    }

    /// Marks the email as verified, keeping the first verification time
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        self.email_verified_at.get_or_insert(now);
        self.updated_at = now;
    }

    /// Overwrites the profile fields in place
    pub fn apply_profile(&mut self, profile: UserProfile, now: DateTime<Utc>) {
        self.name = profile.name;
        self.needs_accessibility = profile.needs_accessibility;
        self.accessibility_details = profile.accessibility_details;
        self.updated_at = now;
    }

    pub fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }
}
