//! Tests for the API-side tenant resolution: header first, session cookie
//! fallback. These routes never touch the database, so they run against a
//! lazily-connecting client.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

async fn get_json(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn tenant_header_wins() {
    let app = common::test_app(common::test_config()).await;
    let req = Request::builder()
        .uri("/api/tenant")
        .header("host", "acme.example.com")
        .header("x-tenant", "acme")
        .body(Body::empty())
        .unwrap();

    let (status, body) = get_json(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant"], "acme");
    assert_eq!(body["source"], "header");
}

#[tokio::test]
async fn session_cookie_is_the_fallback() {
    let app = common::test_app(common::test_config()).await;
    let blob = r#"{"email":"ana@example.org","display_name":"Ana","company_slug":"abc-shop"}"#;
    let req = Request::builder()
        .uri("/api/tenant")
        .header("host", "example.com")
        .header("cookie", format!("{}={}", common::TEST_SESSION_COOKIE, blob))
        .body(Body::empty())
        .unwrap();

    let (status, body) = get_json(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant"], "abc-shop");
    assert_eq!(body["source"], "session");
}

#[tokio::test]
async fn anonymous_request_resolves_nothing() {
    let app = common::test_app(common::test_config()).await;
    let req = Request::builder()
        .uri("/api/tenant")
        .header("host", "example.com")
        .body(Body::empty())
        .unwrap();

    let (status, body) = get_json(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant"], Value::Null);
    assert_eq!(body["source"], Value::Null);
}

#[tokio::test]
async fn current_company_without_context_is_404() {
    let app = common::test_app(common::test_config()).await;
    let req = Request::builder()
        .uri("/api/companies/current")
        .header("host", "example.com")
        .body(Body::empty())
        .unwrap();

    let (status, _) = get_json(app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
