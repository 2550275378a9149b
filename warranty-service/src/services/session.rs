//! Session store seam.
//!
//! The session is an opaque collaborator of the routing layer: one contract,
//! cookies in, optional session out. Tenant resolution never reaches into
//! it; only the API surface uses it, as a fallback when no tenant header is
//! present.

use crate::models::Session;
use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;
use service_core::error::AppError;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up the session carried by the request cookies, if any.
    async fn lookup_session(&self, cookies: &CookieJar) -> Result<Option<Session>, AppError>;
}

/// Session store reading a JSON blob from a single cookie.
pub struct CookieSessionStore {
    cookie_name: String,
}

impl CookieSessionStore {
    pub fn new(cookie_name: &str) -> Self {
        Self {
            cookie_name: cookie_name.to_string(),
        }
    }
}

#[async_trait]
impl SessionStore for CookieSessionStore {
    async fn lookup_session(&self, cookies: &CookieJar) -> Result<Option<Session>, AppError> {
        let Some(cookie) = cookies.get(&self.cookie_name) else {
            return Ok(None);
        };

        match serde_json::from_str::<Session>(cookie.value()) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A stale or tampered blob is an anonymous request, not an
                // error the client can act on.
                tracing::debug!(cookie = %self.cookie_name, error = %e, "Discarding unparseable session cookie");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;

    #[tokio::test]
    async fn missing_cookie_is_anonymous() {
        let store = CookieSessionStore::new("wr_session");
        let jar = CookieJar::new();
        assert!(store.lookup_session(&jar).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn valid_blob_round_trips() {
        let store = CookieSessionStore::new("wr_session");
        let jar = CookieJar::new().add(Cookie::new(
            "wr_session",
            r#"{"email":"ana@example.org","display_name":"Ana","company_slug":"abc-shop"}"#,
        ));
        let session = store.lookup_session(&jar).await.unwrap().unwrap();
        assert_eq!(session.email, "ana@example.org");
        assert_eq!(session.company_slug.as_deref(), Some("abc-shop"));
    }

    #[tokio::test]
    async fn garbage_blob_degrades_to_anonymous() {
        let store = CookieSessionStore::new("wr_session");
        let jar = CookieJar::new().add(Cookie::new("wr_session", "not-json"));
        assert!(store.lookup_session(&jar).await.unwrap().is_none());
    }
}
