use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registerable product belonging to a company brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_id: String,
    pub brand_id: String,
    pub name: String,
    pub model_number: Option<String>,
    /// Default warranty period applied at registration time.
    pub warranty_months: i32,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(company_id: String, brand_id: String, name: String, warranty_months: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            brand_id,
            name,
            model_number: None,
            warranty_months,
            created_at: Utc::now(),
        }
    }
}
