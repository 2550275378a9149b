use serde::{Deserialize, Serialize};

/// Session blob carried in the session cookie.
///
/// Opaque to the tenant router; only the API surface reads it, as a
/// fallback when no `x-tenant` header was set upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub display_name: String,
    /// Slug of the company the session was opened against, when known.
    pub company_slug: Option<String>,
}
