use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyStatus {
    Active,
    Expired,
    Voided,
}

/// A registered warranty, always scoped to the company that sold the
/// product. Every query against this collection filters on `company_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warranty {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_id: String,
    pub product_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub serial_number: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub purchased_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
    pub status: WarrantyStatus,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Warranty {
    pub fn new(
        company_id: String,
        product_id: String,
        customer_email: String,
        customer_name: String,
        serial_number: String,
        purchased_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            product_id,
            customer_email,
            customer_name,
            serial_number,
            purchased_at,
            expires_at,
            status: WarrantyStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}
