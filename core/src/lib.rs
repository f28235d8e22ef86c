//! # Ouvidoria Core
//!
//! Core business logic and domain layer for the Ouvidoria backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, Manifestation, ManifestationKind, ManifestationStatus, NewManifestation, OtpCode,
    SessionToken, User, UserProfile,
};
pub use domain::value_objects::{AuthResponse, UserSummary};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    IssueOutcome, ManifestationRepository, MockManifestationRepository, MockOtpRepository,
    MockUserRepository, OtpRepository, UserRepository,
};
pub use services::{
    AuthService, Clock, EmailServiceTrait, FixedClock, ManifestationInput, ManifestationService,
    ProfileService, RegisterInput, RejectReason, SendOtpOutcome, SessionService,
    SessionServiceConfig, SystemClock, VerificationService, VerificationServiceConfig,
    VerifyOtpOutcome,
};
