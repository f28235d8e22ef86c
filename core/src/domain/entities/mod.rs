//! Domain entities representing core business objects.

pub mod manifestation;
pub mod otp_code;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use manifestation::{
    Manifestation, ManifestationKind, ManifestationStatus, NewManifestation,
    DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, SUBJECT_MAX_CHARS, SUBJECT_MIN_CHARS,
};
pub use otp_code::{
    OtpCode, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
    RESEND_COOLDOWN_SECONDS,
};
pub use session::{Claims, SessionToken, JWT_AUDIENCE, JWT_ISSUER};
pub use user::{User, UserProfile};
