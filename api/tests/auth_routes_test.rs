//! HTTP tests for the email code login flow

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::Value;

use ouv_api::create_app;
use ouv_core::OtpRepository;

use common::{bearer, context, send_code_request, verify_code_request, PAYLOAD_LIMIT};

#[actix_web::test]
async fn send_code_then_cooldown_then_reissue() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let resp = test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["resend_after"], 60);
    assert!(body["expires_at"].is_string());

    let first = ctx.codes.find_by_email("a@b.com").await.unwrap().unwrap();

    ctx.clock.advance(Duration::seconds(10));
    let resp = test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers().get("retry-after").unwrap(), "50");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(body["retry_after"], 50);

    let unchanged = ctx.codes.find_by_email("a@b.com").await.unwrap().unwrap();
    assert_eq!(unchanged, first);

    ctx.clock.advance(Duration::seconds(55));
    let resp = test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let second = ctx.codes.find_by_email("a@b.com").await.unwrap().unwrap();
    assert_ne!(second.id, first.id);
    assert_eq!(ctx.codes.count().await, 1);
}

#[actix_web::test]
async fn send_code_normalizes_and_validates_email() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let resp = test::call_service(&app, send_code_request("  A@B.com ").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.mailbox.last_code_for("a@b.com").is_some());

    let resp = test::call_service(&app, send_code_request("not-an-email").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "EMAIL_INVALID");
    assert_eq!(body["message"], "Endereço de e-mail inválido");

    let resp = test::call_service(&app, send_code_request("").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn verify_code_issues_session_and_me_returns_user() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    let code = ctx.mailbox.last_code_for("a@b.com").unwrap();

    let resp = test::call_service(&app, verify_code_request("a@b.com", &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["is_new_user"], true);
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["is_verified"], true);
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["email"], "a@b.com");

    // Single use
    let resp = test::call_service(&app, verify_code_request("a@b.com", &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn verify_code_rejects_wrong_and_expired_codes() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    let code = ctx.mailbox.last_code_for("a@b.com").unwrap();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let req = verify_code_request("a@b.com", wrong)
        .insert_header(("Accept-Language", "en-US"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_CODE_INVALID");
    assert_eq!(body["message"], "Invalid or expired verification code");
    assert_eq!(body["details"]["remaining_attempts"], 4);

    ctx.clock.advance(Duration::minutes(15));
    let resp = test::call_service(&app, verify_code_request("a@b.com", &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.codes.find_by_email("a@b.com").await.unwrap().is_none());
}

#[actix_web::test]
async fn verify_code_exhausts_attempts() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    let code = ctx.mailbox.last_code_for("a@b.com").unwrap();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    for _ in 0..4 {
        let resp = test::call_service(&app, verify_code_request("a@b.com", wrong).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let resp = test::call_service(&app, verify_code_request("a@b.com", wrong).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_ATTEMPTS_EXHAUSTED");

    // The code is gone even though it was correct
    let resp = test::call_service(&app, verify_code_request("a@b.com", &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn me_requires_valid_session() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer("garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn expired_session_is_rejected() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    let code = ctx.mailbox.last_code_for("a@b.com").unwrap();
    let body: Value =
        test::call_and_read_body_json(&app, verify_code_request("a@b.com", &code).to_request()).await;
    let token = body["token"].as_str().unwrap().to_string();

    ctx.clock.advance(Duration::days(8));
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[actix_web::test]
async fn malformed_json_is_a_localized_validation_error() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"mail\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn health_without_database() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}
