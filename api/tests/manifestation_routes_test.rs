//! HTTP tests for filing and tracking manifestations

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use ouv_api::create_app;

use common::{bearer, context, send_code_request, verify_code_request, PAYLOAD_LIMIT};

fn submission(is_anonymous: bool) -> Value {
    json!({
        "kind": "reclamação",
        "subject": "Buraco na rua",
        "description": "Há um buraco enorme na rua principal do bairro.",
        "is_anonymous": is_anonymous,
    })
}

#[actix_web::test]
async fn anonymous_submission_and_tracking() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/manifestations")
        .set_json(submission(true))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["kind"], "complaint");
    assert_eq!(created["status"], "received");
    assert!(created.get("user_id").is_none());

    let protocol = created["protocol"].as_str().unwrap();
    assert_eq!(protocol.len(), 15);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/manifestations/{}", protocol))
        .to_request();
    let tracked: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tracked["id"], created["id"]);
}

#[actix_web::test]
async fn tracking_unknown_or_malformed_protocol() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/manifestations/20240101-000001")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MANIFESTATION_NOT_FOUND");

    let req = test::TestRequest::get()
        .uri("/api/v1/manifestations/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn invalid_submission_is_rejected() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/manifestations")
        .set_json(json!({
            "kind": "pedido",
            "subject": "Assunto",
            "description": "Descrição suficientemente longa.",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/manifestations")
        .set_json(json!({
            "kind": "elogio",
            "subject": "Ok",
            "description": "curta",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    assert_eq!(ctx.manifestations.count().await, 0);
}

#[actix_web::test]
async fn signed_in_citizen_lists_own_manifestations() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    test::call_service(&app, send_code_request("a@b.com").to_request()).await;
    let code = ctx.mailbox.last_code_for("a@b.com").unwrap();
    let login: Value =
        test::call_and_read_body_json(&app, verify_code_request("a@b.com", &code).to_request()).await;
    let token = login["token"].as_str().unwrap().to_string();

    for is_anonymous in [false, true] {
        let req = test::TestRequest::post()
            .uri("/api/v1/manifestations")
            .insert_header(bearer(&token))
            .set_json(submission(is_anonymous))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/manifestations")
        .insert_header(bearer(&token))
        .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    let items = list.as_array().unwrap();

    // The anonymous one is not linked to the account
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["is_anonymous"], false);
}

#[actix_web::test]
async fn listing_requires_session() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::get().uri("/api/v1/manifestations").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/manifestations")
        .insert_header(bearer("not-a-token"))
        .set_json(submission(false))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
