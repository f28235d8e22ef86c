//! Resend HTTP API email service
//!
//! A failed delivery is reported to the caller straight away.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ouv_core::EmailServiceTrait;
use ouv_shared::validation::mask_email;
use ouv_shared::EmailConfig;

use super::template::VerificationEmail;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Email service backed by the Resend API
pub struct ResendEmailService {
    client: Client,
    api_key: String,
    config: EmailConfig,
}

impl ResendEmailService {
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("EMAIL api_key is required for resend".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Posts one message to the provider; failures are not retried
    async fn send(&self, to: &str, message: &VerificationEmail) -> Result<String, InfrastructureError> {
        let from = self.config.sender();
        let request = SendEmailRequest {
            from: &from,
            to: [to],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        tracing::debug!(email = %mask_email(to), "Sending email");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let body: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| InfrastructureError::Email(format!("unexpected provider response: {}", e)))?;
        Ok(body.id)
    }
}

#[async_trait]
impl EmailServiceTrait for ResendEmailService {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let message = VerificationEmail::render(code, expires_in_minutes);

        match self.send(email, &message).await {
            Ok(id) => {
                tracing::info!(email = %mask_email(email), message_id = %id, "Verification email sent");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(email = %mask_email(email), error = %e, "Verification email failed");
                Err(e.to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "resend"
    }
}
