pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    extract::State,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    request_id::request_id_middleware, security_headers::security_headers_middleware,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::WarrantyConfig;
use crate::middleware::{tenant_router_middleware, TenantRouter};
use crate::services::{MongoDb, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: WarrantyConfig,
    pub db: MongoDb,
    pub sessions: Arc<dyn SessionStore>,
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let tenant_router = TenantRouter::new(&state.config.apex_domain);

    let app = Router::new()
        .route("/health", get(health_check))
        // Internal tenant route tree; one set of handlers serves every
        // company, addressed by the rewritten :tenant segment.
        .route("/tenants/:tenant/home", get(handlers::tenant::home))
        .route("/tenants/:tenant/admin", get(handlers::tenant::admin_home))
        .route(
            "/tenants/:tenant/admin/*section",
            get(handlers::tenant::admin_section),
        )
        .route(
            "/tenants/:tenant/register",
            get(handlers::tenant::registration),
        )
        .route(
            "/tenants/:tenant/my-warranties",
            get(handlers::tenant::my_warranties),
        )
        // API surface; resolves tenancy independently of the router.
        .route("/api/tenant", get(handlers::api::tenant_context))
        .route("/api/companies/current", get(handlers::api::current_company))
        // Everything else is a tenant-agnostic global page.
        .fallback(get(handlers::tenant::global_page))
        .with_state(state.clone())
        // Tenant resolution and rewriting; must wrap route matching.
        .layer(from_fn_with_state(tenant_router, tenant_router_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(
                    state
                        .config
                        .security
                        .allowed_origins
                        .iter()
                        .map(|o| {
                            o.parse::<axum::http::HeaderValue>().unwrap_or_else(|e| {
                                tracing::error!(
                                    "Invalid CORS origin '{}': {}. Using fallback.",
                                    o,
                                    e
                                );
                                axum::http::HeaderValue::from_static("*")
                            })
                        })
                        .collect::<Vec<axum::http::HeaderValue>>(),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::HeaderName::from_static("x-tenant"),
                    axum::http::header::HeaderName::from_static("x-request-id"),
                ]),
        );

    Ok(app)
}

/// Service health check.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "MongoDB health check failed");
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "mongodb": "up"
        }
    })))
}
