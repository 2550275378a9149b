//! End-to-end tenant page tests: seed a company through the data layer,
//! then drive requests through the tenant router and handlers.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;
use warranty_service::models::{Brand, Company, Product, Warranty};

async fn seed_company(state: &warranty_service::AppState) -> Company {
    let company = Company::new("abc-shop".to_string(), "ABC Shop".to_string());
    state
        .db
        .companies()
        .insert_one(&company, None)
        .await
        .unwrap();

    let brand = Brand::new(company.id.clone(), "Volter".to_string());
    state.db.brands().insert_one(&brand, None).await.unwrap();

    let product = Product::new(company.id.clone(), brand.id.clone(), "Drill X1".to_string(), 24);
    state
        .db
        .products()
        .insert_one(&product, None)
        .await
        .unwrap();

    let warranty = Warranty::new(
        company.id.clone(),
        product.id.clone(),
        "ana@example.org".to_string(),
        "Ana".to_string(),
        "SN-0001".to_string(),
        Utc::now(),
        Utc::now() + Duration::days(730),
    );
    state
        .db
        .warranties()
        .insert_one(&warranty, None)
        .await
        .unwrap();

    company
}

async fn get_json(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn cleanup(uri: &str, db_name: &str) {
    let client = mongodb::Client::with_uri_str(uri).await.unwrap();
    client.database(db_name).drop(None).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn tenant_home_serves_the_seeded_company() {
    let config = common::test_config();
    let (uri, db_name) = (config.mongodb.uri.clone(), config.mongodb.database.clone());
    let state = common::test_state(config).await;
    seed_company(&state).await;
    let app = warranty_service::build_router(state).unwrap();

    let req = Request::builder()
        .uri("/abc-shop")
        .header("host", "localhost:3000")
        .body(Body::empty())
        .unwrap();
    let (status, body) = get_json(app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "home");
    assert_eq!(body["company"]["name"], "ABC Shop");
    assert_eq!(body["resolved_via"], "localhost");

    cleanup(&uri, &db_name).await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn unknown_tenant_is_404() {
    let config = common::test_config();
    let (uri, db_name) = (config.mongodb.uri.clone(), config.mongodb.database.clone());
    let state = common::test_state(config).await;
    let app = warranty_service::build_router(state).unwrap();

    let req = Request::builder()
        .uri("/no-such-shop/admin")
        .header("host", "localhost:3000")
        .body(Body::empty())
        .unwrap();
    let (status, _) = get_json(app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    cleanup(&uri, &db_name).await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn my_warranties_lists_only_the_customers_records() {
    let config = common::test_config();
    let (uri, db_name) = (config.mongodb.uri.clone(), config.mongodb.database.clone());
    let state = common::test_state(config).await;
    seed_company(&state).await;
    let app = warranty_service::build_router(state).unwrap();

    let blob = r#"{"email":"ana@example.org","display_name":"Ana","company_slug":"abc-shop"}"#;
    let req = Request::builder()
        .uri("/abc-shop/my-warranties")
        .header("host", "localhost:3000")
        .header("cookie", format!("{}={}", common::TEST_SESSION_COOKIE, blob))
        .body(Body::empty())
        .unwrap();
    let (status, body) = get_json(app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"], "ana@example.org");
    assert_eq!(body["warranties"].as_array().unwrap().len(), 1);
    assert_eq!(body["warranties"][0]["serial_number"], "SN-0001");

    cleanup(&uri, &db_name).await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn my_warranties_without_session_is_401() {
    let config = common::test_config();
    let (uri, db_name) = (config.mongodb.uri.clone(), config.mongodb.database.clone());
    let state = common::test_state(config).await;
    seed_company(&state).await;
    let app = warranty_service::build_router(state).unwrap();

    let req = Request::builder()
        .uri("/abc-shop/my-warranties")
        .header("host", "localhost:3000")
        .body(Body::empty())
        .unwrap();
    let (status, _) = get_json(app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    cleanup(&uri, &db_name).await;
}
