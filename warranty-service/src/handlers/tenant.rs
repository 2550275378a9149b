//! Handlers for the internal tenant route tree.
//!
//! The tenant router has already rewritten the request by the time these
//! run; the slug arrives as the `:tenant` path segment and as the
//! [`TenantContext`] extension. Unknown or suspended companies are this
//! layer's decision, not the router's: they answer 404.

use axum::{
    extract::{Path, State},
    http::Uri,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::{middleware::TenantContext, models::Company, AppState};

async fn active_company(state: &AppState, slug: &str) -> Result<Company, AppError> {
    state
        .db
        .find_company_by_slug(slug)
        .await?
        .filter(Company::is_active)
        .ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Unknown or inactive company: {}", slug))
        })
}

/// Tenant landing page.
pub async fn home(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    ctx: TenantContext,
) -> Result<Json<Value>, AppError> {
    let company = active_company(&state, &tenant).await?;
    Ok(Json(json!({
        "page": "home",
        "company": { "slug": company.slug, "name": company.name, "logo_key": company.logo_key },
        "resolved_via": ctx.mode.as_str(),
    })))
}

/// Admin console root: company summary with entity counts.
pub async fn admin_home(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<Json<Value>, AppError> {
    let company = active_company(&state, &tenant).await?;
    let (brands, products, warranties) = (
        state.db.count_brands(&company.id).await?,
        state.db.count_products(&company.id).await?,
        state.db.count_warranties(&company.id).await?,
    );
    Ok(Json(json!({
        "page": "admin",
        "company": { "slug": company.slug, "name": company.name },
        "counts": { "brands": brands, "products": products, "warranties": warranties },
    })))
}

/// Admin console section (`/admin/brands`, `/admin/products`, ...). The
/// remainder after the `/admin` prefix survives the rewrite verbatim.
pub async fn admin_section(
    State(state): State<AppState>,
    Path((tenant, section)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let company = active_company(&state, &tenant).await?;
    Ok(Json(json!({
        "page": "admin",
        "section": section,
        "company": { "slug": company.slug, "name": company.name },
    })))
}

/// Warranty registration bootstrap: the brands and products a customer can
/// register against. Form validation itself lives client-side.
pub async fn registration(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<Json<Value>, AppError> {
    let company = active_company(&state, &tenant).await?;
    let brands = state.db.list_brands(&company.id).await?;
    let products = state.db.list_products(&company.id).await?;
    Ok(Json(json!({
        "page": "register",
        "company": { "slug": company.slug, "name": company.name },
        "brands": brands,
        "products": products,
    })))
}

/// The signed-in customer's warranties within this company.
pub async fn my_warranties(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    jar: CookieJar,
) -> Result<Json<Value>, AppError> {
    let company = active_company(&state, &tenant).await?;
    let session = state
        .sessions
        .lookup_session(&jar)
        .await?
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Sign in to view warranties")))?;

    let warranties = state
        .db
        .list_warranties_for_customer(&company.id, &session.email)
        .await?;
    Ok(Json(json!({
        "page": "my-warranties",
        "company": { "slug": company.slug, "name": company.name },
        "customer": session.email,
        "warranties": warranties,
    })))
}

/// Fallback for paths outside the rewrite table: tenant-agnostic
/// marketing/global pages.
pub async fn global_page(uri: Uri) -> Json<Value> {
    Json(json!({
        "page": "global",
        "path": uri.path(),
    }))
}
