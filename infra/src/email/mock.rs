//! Email service that logs messages instead of sending them

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use ouv_core::EmailServiceTrait;
use ouv_shared::validation::mask_email;

use super::template::VerificationEmail;

/// A message captured by [`MockEmailService`]
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub code: String,
    pub message: VerificationEmail,
}

/// Development and test email service
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message captured so far
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// The most recent code sent to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent().into_iter().rev().find(|m| m.to == email).map(|m| m.code)
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let message = VerificationEmail::render(code, expires_in_minutes);
        let message_id = format!("mock-{}", Uuid::new_v4());

        tracing::info!(
            email = %mask_email(email),
            message_id = %message_id,
            subject = %message.subject,
            "[MOCK EMAIL] Verification code message captured"
        );

        self.sent
            .lock()
            .map_err(|_| "mock mailbox poisoned".to_string())?
            .push(SentEmail {
                to: email.to_string(),
                code: code.to_string(),
                message,
            });

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
