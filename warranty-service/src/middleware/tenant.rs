//! Tenant resolution and request rewriting.
//!
//! Every inbound request (minus static assets and `/api/*`, which resolve
//! tenancy on their own) is mapped to a tenant slug derived from the request
//! host in production, or from the leading path segment during local
//! development. The request path is then rewritten onto the internal
//! `/tenants/{slug}/...` route tree so a single set of handlers serves every
//! company, and the resolved identity travels downstream as headers plus a
//! [`TenantContext`] extension.
//!
//! Resolution is a pure function of `(host, path)` and never fails: any host
//! or path shape that does not match a known form degrades to the empty
//! tenant and the path passes through untouched.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::HOST,
        request::Parts,
        uri::Uri,
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

/// Resolved tenant slug, possibly empty (apex/marketing traffic).
pub const TENANT_HEADER: &str = "x-tenant";
/// Which resolution strategy produced the slug: `localhost` or `production`.
pub const TENANT_HOST_HEADER: &str = "x-tenant-host";
/// Verbatim inbound host, for diagnostics and cookie-domain decisions.
pub const ORIGINAL_HOSTNAME_HEADER: &str = "x-original-hostname";

/// First segment of every internal tenant route.
pub const INTERNAL_PREFIX: &str = "tenants";

/// Leading path segments that can never be a tenant slug.
const RESERVED_SEGMENTS: &[&str] = &["api", "_next", INTERNAL_PREFIX, "register", "super-admin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    Localhost,
    Production,
}

impl ResolutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Localhost => "localhost",
            ResolutionMode::Production => "production",
        }
    }
}

/// Outcome of a single resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Tenant slug; empty means "no tenant".
    pub tenant: String,
    pub mode: ResolutionMode,
    /// Path the request should be dispatched under.
    pub path: String,
}

/// Tenant identity attached to the request for downstream handlers.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub slug: Option<String>,
    pub mode: ResolutionMode,
    pub original_host: String,
}

impl TenantContext {
    /// Slug of the resolved tenant, or a not-found error for apex traffic
    /// that reached a tenant-scoped handler.
    pub fn require_slug(&self) -> Result<&str, AppError> {
        self.slug
            .as_deref()
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("No tenant resolved for request")))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant context not found")))
    }
}

/// Host/path to tenant resolver. Cheap to clone; carries only the apex
/// domain it was configured with.
#[derive(Debug, Clone)]
pub struct TenantRouter {
    apex_domain: String,
}

impl TenantRouter {
    pub fn new(apex_domain: &str) -> Self {
        Self {
            apex_domain: apex_domain.trim().trim_end_matches('.').to_ascii_lowercase(),
        }
    }

    /// Resolve the tenant for a `(host, path)` pair and compute the internal
    /// path the request should be served under.
    ///
    /// Idempotent: feeding the returned path (with the same host) back in
    /// yields the same tenant and the same path, and a duplicated leading
    /// tenant segment is collapsed rather than propagated.
    pub fn resolve(&self, host: &str, path: &str) -> Resolution {
        let mode = if host.contains("localhost") || host.contains("127.0.0.1") {
            ResolutionMode::Localhost
        } else {
            ResolutionMode::Production
        };

        // A path already sitting on the internal route tree means a second
        // pass over an already-rewritten request; re-derive the tenant from
        // it instead of resolving again.
        if let Some((tenant, normalized)) = already_rewritten(path) {
            return Resolution {
                tenant,
                mode,
                path: normalized,
            };
        }

        match mode {
            ResolutionMode::Localhost => match path_tenant(path) {
                Some((tenant, stripped)) => {
                    let path = rewrite(&tenant, &stripped);
                    Resolution { tenant, mode, path }
                }
                None => Resolution {
                    tenant: String::new(),
                    mode,
                    path: path.to_string(),
                },
            },
            ResolutionMode::Production => {
                let tenant = self.host_tenant(host);
                let path = if tenant.is_empty() {
                    path.to_string()
                } else {
                    rewrite(&tenant, path)
                };
                Resolution { tenant, mode, path }
            }
        }
    }

    /// Derive a tenant slug from a production host.
    ///
    /// `sub.<apex>` yields `sub` (unless `www`), the bare apex and
    /// `www.<apex>` yield no tenant, and a custom domain with three or more
    /// labels yields its leading label. Everything else is apex traffic.
    fn host_tenant(&self, host: &str) -> String {
        let host = strip_port(host).to_ascii_lowercase();
        let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
        let apex: Vec<&str> = self
            .apex_domain
            .split('.')
            .filter(|l| !l.is_empty())
            .collect();

        if !apex.is_empty() && labels.len() == apex.len() + 1 && labels[1..] == apex[..] {
            if labels[0] == "www" {
                String::new()
            } else {
                labels[0].to_string()
            }
        } else if !apex.is_empty() && labels == apex {
            String::new()
        } else if labels.len() >= 3 {
            if labels[0] == "www" {
                String::new()
            } else {
                labels[0].to_string()
            }
        } else {
            String::new()
        }
    }
}

/// Paths the router must not touch: static assets, framework internals and
/// the API surface, which resolves tenancy independently.
pub fn is_excluded_path(path: &str) -> bool {
    path == "/favicon.ico"
        || path.starts_with("/_next/static/")
        || path.starts_with("/_next/image/")
        || path == "/api"
        || path.starts_with("/api/")
        || final_segment_has_extension(path)
}

fn final_segment_has_extension(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|seg| seg.contains('.'))
}

/// Extract the tenant from a path already rewritten onto the internal route
/// tree, collapsing a duplicated `/{tenant}/{tenant}/` prefix if a double
/// dispatch produced one.
fn already_rewritten(path: &str) -> Option<(String, String)> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.first() != Some(&INTERNAL_PREFIX) || segments.len() < 2 {
        return None;
    }

    let tenant = segments[1].to_string();
    let mut rest: &[&str] = &segments[2..];
    while rest.first() == Some(&tenant.as_str()) {
        rest = &rest[1..];
    }

    let normalized = if rest.is_empty() {
        format!("/{}/{}/home", INTERNAL_PREFIX, tenant)
    } else {
        format!("/{}/{}/{}", INTERNAL_PREFIX, tenant, rest.join("/"))
    };
    Some((tenant, normalized))
}

/// Extract a candidate tenant from the leading path segment (development
/// mode). Reserved words and dotted segments (misrouted filenames) are
/// rejected. Returns the tenant and the tenant-stripped remainder.
fn path_tenant(path: &str) -> Option<(String, String)> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let first = *segments.first()?;
    if RESERVED_SEGMENTS.contains(&first) || first.contains('.') {
        return None;
    }

    let tenant = first.to_string();
    let mut rest: &[&str] = &segments[1..];
    // Collapse a duplicated tenant prefix instead of carrying it forward.
    while rest.first() == Some(&tenant.as_str()) {
        rest = &rest[1..];
    }

    let stripped = if rest.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", rest.join("/"))
    };
    Some((tenant, stripped))
}

/// Map a tenant-stripped path onto the internal route tree. Paths outside
/// the fixed prefix table pass through and are served tenant-agnostically.
fn rewrite(tenant: &str, stripped: &str) -> String {
    let base = format!("/{}/{}", INTERNAL_PREFIX, tenant);
    if stripped == "/" {
        format!("{}/home", base)
    } else if let Some(rest) = strip_route_prefix(stripped, "/admin") {
        format!("{}/admin{}", base, rest)
    } else if let Some(rest) = strip_route_prefix(stripped, "/register") {
        format!("{}/register{}", base, rest)
    } else if let Some(rest) = strip_route_prefix(stripped, "/my-warranties") {
        format!("{}/my-warranties{}", base, rest)
    } else {
        stripped.to_string()
    }
}

/// Match `prefix` as a whole leading segment, returning the remainder.
fn strip_route_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((h, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => h,
        _ => host,
    }
}

fn set_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(_) => {
            // Unrepresentable value; better no header than a spoofed one
            // left over from the inbound request.
            headers.remove(name);
        }
    }
}

fn rewrite_uri(uri: &Uri, new_path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(q) => format!("{}?{}", new_path, q),
        None => new_path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

/// Axum middleware wrapping [`TenantRouter::resolve`].
///
/// Overwrites the tenant metadata headers (inbound values are never trusted),
/// attaches a [`TenantContext`] extension and rewrites the request URI.
/// Excluded paths bypass resolution entirely.
pub async fn tenant_router_middleware(
    State(router): State<TenantRouter>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if is_excluded_path(&path) {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
        .to_string();

    let resolution = router.resolve(&host, &path);

    let headers = req.headers_mut();
    set_header(headers, TENANT_HEADER, &resolution.tenant);
    set_header(headers, TENANT_HOST_HEADER, resolution.mode.as_str());
    set_header(headers, ORIGINAL_HOSTNAME_HEADER, &host);

    req.extensions_mut().insert(TenantContext {
        slug: if resolution.tenant.is_empty() {
            None
        } else {
            Some(resolution.tenant.clone())
        },
        mode: resolution.mode,
        original_host: host,
    });

    if resolution.path != path {
        if let Some(uri) = rewrite_uri(req.uri(), &resolution.path) {
            tracing::debug!(
                tenant = %resolution.tenant,
                from = %path,
                to = %resolution.path,
                "Rewrote request onto internal tenant route"
            );
            *req.uri_mut() = uri;
        }
    }

    next.run(req).await
}
