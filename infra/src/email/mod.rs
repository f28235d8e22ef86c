//! Email delivery
//!
//! Sends verification codes through a transactional email provider. The
//! provider is picked from configuration at startup.

pub mod mock;
pub mod resend;
pub mod template;

pub use mock::{MockEmailService, SentEmail};
pub use resend::ResendEmailService;
pub use template::VerificationEmail;

use async_trait::async_trait;

use ouv_core::EmailServiceTrait;
use ouv_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

/// Configured email provider
pub enum EmailService {
    Resend(ResendEmailService),
    Mock(MockEmailService),
}

#[async_trait]
impl EmailServiceTrait for EmailService {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        match self {
            EmailService::Resend(service) => {
                service.send_verification_code(email, code, expires_in_minutes).await
            }
            EmailService::Mock(service) => {
                service.send_verification_code(email, code, expires_in_minutes).await
            }
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            EmailService::Resend(service) => service.provider_name(),
            EmailService::Mock(service) => service.provider_name(),
        }
    }
}

/// Create the email service selected by `config.provider`
///
/// A real provider without credentials is a configuration error rather than
/// a silent fallback to the mock.
pub fn create_email_service(config: &EmailConfig) -> Result<EmailService, InfrastructureError> {
    match config.provider {
        EmailProvider::Resend => {
            let service = ResendEmailService::new(config.clone())?;
            tracing::info!(provider = "resend", sender = %config.from_address, "Email service initialized");
            Ok(EmailService::Resend(service))
        }
        EmailProvider::Mock => {
            tracing::warn!("Using mock email service, verification codes are only logged");
            Ok(EmailService::Mock(MockEmailService::new()))
        }
    }
}
