//! Mock implementations for testing the verification service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::services::verification::traits::EmailServiceTrait;

/// Email service that records the last code sent to each address
#[derive(Clone, Default)]
pub struct MockEmailService {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub send_count: Arc<Mutex<usize>>,
    pub should_fail: bool,
}

impl MockEmailService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            should_fail,
            ..Default::default()
        }
    }

    pub fn get_sent_code(&self, email: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(email).cloned()
    }

    pub fn sent(&self) -> usize {
        *self.send_count.lock().unwrap()
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _expires_in_minutes: i64,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Email service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        *self.send_count.lock().unwrap() += 1;
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
