//! Email delivery integration

use async_trait::async_trait;

/// Trait for email delivery of verification codes
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code by email
    ///
    /// # Returns
    /// * `Ok(message_id)` - Provider message identifier
    /// * `Err(reason)` - Delivery failed; the caller does not retry
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
