//! API surface. `/api/*` bypasses the tenant router, so these handlers
//! resolve their own tenant context: the `x-tenant` header when the request
//! came through the router on the same origin, otherwise the session
//! cookie.

use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::{middleware::TENANT_HEADER, AppState};

/// Where an API tenant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TenantSource {
    Header,
    Session,
}

impl TenantSource {
    fn as_str(&self) -> &'static str {
        match self {
            TenantSource::Header => "header",
            TenantSource::Session => "session",
        }
    }
}

async fn resolve_api_tenant(
    state: &AppState,
    headers: &HeaderMap,
    jar: &CookieJar,
) -> Result<Option<(String, TenantSource)>, AppError> {
    if let Some(tenant) = headers
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        return Ok(Some((tenant.to_string(), TenantSource::Header)));
    }

    let session = state.sessions.lookup_session(jar).await?;
    Ok(session
        .and_then(|s| s.company_slug)
        .map(|slug| (slug, TenantSource::Session)))
}

/// Report the tenant context the API resolved for this request.
pub async fn tenant_context(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<Value>, AppError> {
    match resolve_api_tenant(&state, &headers, &jar).await? {
        Some((tenant, source)) => Ok(Json(json!({
            "tenant": tenant,
            "source": source.as_str(),
        }))),
        None => Ok(Json(json!({ "tenant": Value::Null, "source": Value::Null }))),
    }
}

/// The company behind the resolved tenant context.
pub async fn current_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<Value>, AppError> {
    let (tenant, _) = resolve_api_tenant(&state, &headers, &jar)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("No tenant context for request")))?;

    let company = state
        .db
        .find_company_by_slug(&tenant)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Unknown company: {}", tenant)))?;

    Ok(Json(json!({
        "company": {
            "slug": company.slug,
            "name": company.name,
            "status": company.status,
            "custom_domain": company.custom_domain,
        }
    })))
}
