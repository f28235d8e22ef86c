//! Shared fixtures for the HTTP tests: in-memory repositories, the
//! recording email provider and a controllable clock.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test::TestRequest, web};
use serde_json::json;

use ouv_api::AppState;
use ouv_core::{
    AuthService, FixedClock, ManifestationService, MockManifestationRepository, MockOtpRepository,
    MockUserRepository, ProfileService, SessionService, SessionServiceConfig, VerificationService,
    VerificationServiceConfig,
};
use ouv_infra::email::MockEmailService;

pub const PAYLOAD_LIMIT: usize = 256 * 1024;

pub type TestState =
    AppState<MockUserRepository, MockManifestationRepository, MockOtpRepository, MockEmailService>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub mailbox: MockEmailService,
    pub clock: FixedClock,
    pub users: MockUserRepository,
    pub codes: MockOtpRepository,
    pub manifestations: MockManifestationRepository,
}

pub fn context() -> TestContext {
    let mailbox = MockEmailService::new();
    let clock = FixedClock::default();
    let users = MockUserRepository::new();
    let codes = MockOtpRepository::new();
    let manifestations = MockManifestationRepository::new();

    let verification = Arc::new(VerificationService::new(
        Arc::new(mailbox.clone()),
        Arc::new(codes.clone()),
        Arc::new(clock.clone()),
        VerificationServiceConfig::default(),
    ));
    let sessions = Arc::new(SessionService::new(
        SessionServiceConfig::default(),
        Arc::new(clock.clone()),
    ));

    let state = web::Data::new(AppState {
        auth_service: Arc::new(AuthService::new(
            Arc::new(users.clone()),
            verification,
            sessions.clone(),
            Arc::new(clock.clone()),
        )),
        profile_service: Arc::new(ProfileService::new(
            Arc::new(users.clone()),
            Arc::new(clock.clone()),
        )),
        manifestation_service: Arc::new(ManifestationService::new(
            Arc::new(manifestations.clone()),
            Arc::new(clock.clone()),
        )),
        session_service: sessions,
        database: None,
    });

    TestContext {
        state,
        mailbox,
        clock,
        users,
        codes,
        manifestations,
    }
}

pub fn send_code_request(email: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "email": email }))
}

pub fn verify_code_request(email: &str, code: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": email, "code": code }))
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
