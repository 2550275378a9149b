//! Test helpers for warranty-service integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use warranty_service::{
    build_router,
    config::{Environment, MongoConfig, SecurityConfig, WarrantyConfig},
    services::{CookieSessionStore, MongoDb},
    AppState,
};

pub const TEST_APEX: &str = "example.com";
pub const TEST_SESSION_COOKIE: &str = "wr_session";

pub fn test_config() -> WarrantyConfig {
    WarrantyConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "error".to_string(),
        },
        service_name: "warranty-service-test".to_string(),
        service_version: "0.0.0".to_string(),
        environment: Environment::Dev,
        apex_domain: TEST_APEX.to_string(),
        session_cookie: TEST_SESSION_COOKIE.to_string(),
        mongodb: MongoConfig {
            uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("test_warranty_{}", uuid::Uuid::new_v4().simple()),
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    }
}

/// App state over a lazily-connecting Mongo client. Routes that never touch
/// the database can be exercised without a server; DB-backed tests are
/// `#[ignore]`d and expect a reachable MongoDB.
pub async fn test_state(config: WarrantyConfig) -> AppState {
    let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
        .await
        .expect("Failed to create MongoDB client");
    let sessions = Arc::new(CookieSessionStore::new(&config.session_cookie));
    AppState {
        config,
        db,
        sessions,
    }
}

pub async fn test_app(config: WarrantyConfig) -> axum::Router {
    let state = test_state(config).await;
    build_router(state).expect("Failed to build router")
}
