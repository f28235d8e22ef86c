//! Unit tests for the authentication service

use chrono::Duration;
use std::sync::Arc;

use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockOtpRepository, MockUserRepository, UserRepository};
use crate::services::auth::AuthService;
use crate::services::clock::FixedClock;
use crate::services::session::{SessionService, SessionServiceConfig};
use crate::services::verification::tests::mocks::MockEmailService;
use crate::services::verification::{VerificationService, VerificationServiceConfig};

struct Harness {
    service: AuthService<MockUserRepository, MockEmailService, MockOtpRepository>,
    email: MockEmailService,
    users: MockUserRepository,
    clock: FixedClock,
}

fn harness() -> Harness {
    let email = MockEmailService::new(false);
    let users = MockUserRepository::new();
    let clock = FixedClock::default();

    let verification = Arc::new(VerificationService::new(
        Arc::new(email.clone()),
        Arc::new(MockOtpRepository::new()),
        Arc::new(clock.clone()),
        VerificationServiceConfig::default(),
    ));
    let sessions = Arc::new(SessionService::new(
        SessionServiceConfig::default(),
        Arc::new(clock.clone()),
    ));
    let service = AuthService::new(
        Arc::new(users.clone()),
        verification,
        sessions,
        Arc::new(clock.clone()),
    );

    Harness {
        service,
        email,
        users,
        clock,
    }
}

fn wrong_code(code: &str) -> &'static str {
    if code == "999999" {
        "100000"
    } else {
        "999999"
    }
}

#[tokio::test]
async fn test_first_login_creates_verified_user() {
    let h = harness();
    h.service.send_code("a@b.com").await.unwrap();
    let code = h.email.get_sent_code("a@b.com").unwrap();

    let response = h.service.login_with_code("a@b.com", &code).await.unwrap();

    assert!(response.is_new_user);
    assert!(response.user.is_verified);
    assert_eq!(response.user.email.as_deref(), Some("a@b.com"));
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(h.users.count().await, 1);
}

#[tokio::test]
async fn test_second_login_reuses_user() {
    let h = harness();

    h.service.send_code("a@b.com").await.unwrap();
    let code = h.email.get_sent_code("a@b.com").unwrap();
    let first = h.service.login_with_code("a@b.com", &code).await.unwrap();

    h.clock.advance(Duration::seconds(61));
    h.service.send_code("A@b.com").await.unwrap();
    let code = h.email.get_sent_code("a@b.com").unwrap();
    let second = h.service.login_with_code("a@b.com", &code).await.unwrap();

    assert!(!second.is_new_user);
    assert_eq!(first.user.id, second.user.id);
    assert_eq!(h.users.count().await, 1);
}

#[tokio::test]
async fn test_code_cannot_be_reused() {
    let h = harness();
    h.service.send_code("a@b.com").await.unwrap();
    let code = h.email.get_sent_code("a@b.com").unwrap();

    h.service.login_with_code("a@b.com", &code).await.unwrap();
    let replay = h.service.login_with_code("a@b.com", &code).await;

    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::InvalidVerificationCode { .. }))
    ));
}

#[tokio::test]
async fn test_wrong_code_reports_remaining_attempts() {
    let h = harness();
    h.service.send_code("a@b.com").await.unwrap();
    let code = h.email.get_sent_code("a@b.com").unwrap();

    let result = h.service.login_with_code("a@b.com", wrong_code(&code)).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidVerificationCode {
            remaining_attempts: Some(4)
        }))
    ));
}

#[tokio::test]
async fn test_exhausted_attempts() {
    let h = harness();
    h.service.send_code("a@b.com").await.unwrap();
    let code = h.email.get_sent_code("a@b.com").unwrap();

    for _ in 0..4 {
        let _ = h.service.login_with_code("a@b.com", wrong_code(&code)).await;
    }
    let result = h.service.login_with_code("a@b.com", wrong_code(&code)).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::MaxAttemptsExceeded))
    ));
}

#[tokio::test]
async fn test_current_user() {
    let h = harness();
    h.service.send_code("a@b.com").await.unwrap();
    let code = h.email.get_sent_code("a@b.com").unwrap();
    let response = h.service.login_with_code("a@b.com", &code).await.unwrap();

    let user = h.service.current_user(&response.token).await.unwrap();
    assert_eq!(user.id, response.user.id);

    let stored = h.users.find_by_email("a@b.com").await.unwrap().unwrap();
    assert_eq!(stored.id, user.id);
}

#[tokio::test]
async fn test_current_user_rejects_invalid_token() {
    let h = harness();
    let result = h.service.current_user("garbage").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}
