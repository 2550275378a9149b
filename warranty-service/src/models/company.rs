//! Company model - root of the tenancy hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Suspended,
}

/// One customer company on the platform, addressed by its URL-safe slug
/// (subdomain label in production, leading path segment in development).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Custom domain pointed at the platform, if the company brought one.
    pub custom_domain: Option<String>,
    /// Blob-storage key of the company logo; resolution of the key is the
    /// storage collaborator's concern.
    pub logo_key: Option<String>,
    pub status: CompanyStatus,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(slug: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            slug,
            name,
            custom_domain: None,
            logo_key: None,
            status: CompanyStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CompanyStatus::Active
    }
}
