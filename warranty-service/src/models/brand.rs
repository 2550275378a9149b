use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product brand managed by a company's staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_id: String,
    pub name: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Brand {
    pub fn new(company_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            name,
            created_at: Utc::now(),
        }
    }
}
