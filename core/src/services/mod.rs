//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod manifestation;
pub mod profile;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use auth::AuthService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use manifestation::{ManifestationInput, ManifestationService};
pub use profile::{ProfileService, RegisterInput};
pub use session::{SessionService, SessionServiceConfig};
pub use verification::{
    EmailServiceTrait, RejectReason, SendOtpOutcome, VerificationService,
    VerificationServiceConfig, VerifyOtpOutcome,
};
