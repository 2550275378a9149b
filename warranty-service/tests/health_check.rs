mod common;

use axum::{body::Body, http::Request};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn health_check_works() {
    let config = common::test_config();
    let db_name = config.mongodb.database.clone();
    let uri = config.mongodb.uri.clone();
    let app = common::test_app(config).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("host", "example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "warranty-service-test");
    assert_eq!(body["checks"]["mongodb"], "up");

    let client = mongodb::Client::with_uri_str(&uri).await.unwrap();
    client.database(&db_name).drop(None).await.unwrap();
}
