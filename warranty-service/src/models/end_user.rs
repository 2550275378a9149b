use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer account created through the social login provider. The token
/// exchange itself is the provider's concern; only the resulting identity
/// is stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_id: String,
    pub email: String,
    pub display_name: String,
    /// Subject identifier issued by the social login provider.
    pub provider_subject: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl EndUser {
    pub fn new(
        company_id: String,
        email: String,
        display_name: String,
        provider_subject: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            email,
            display_name,
            provider_subject,
            created_at: Utc::now(),
        }
    }
}
