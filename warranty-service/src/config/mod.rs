use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarrantyConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub environment: Environment,
    /// Platform root domain; hosts are matched against it to tell
    /// subdomain tenants apart from apex traffic.
    pub apex_domain: String,
    /// Name of the cookie carrying the session blob.
    pub session_cookie: String,
    pub mongodb: MongoConfig,
    pub security: SecurityConfig,
}

impl WarrantyConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config handles .env and the APP__ prefix.
        let common = core_config::Config::load()?;

        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .to_lowercase()
            .as_str()
        {
            "prod" | "production" => Environment::Prod,
            _ => Environment::Dev,
        };
        let is_prod = environment == Environment::Prod;

        let allowed_origins = core_config::get_env(
            "ALLOWED_ORIGINS",
            Some("http://localhost:3000"),
            is_prod,
        )?
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

        Ok(WarrantyConfig {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "warranty-service".to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment,
            apex_domain: core_config::get_env("APEX_DOMAIN", Some("example.com"), is_prod)?,
            session_cookie: core_config::get_env("SESSION_COOKIE", Some("wr_session"), false)?,
            mongodb: MongoConfig {
                uri: core_config::get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: core_config::get_env("MONGODB_DATABASE", Some("warranty_db"), is_prod)?,
            },
            security: SecurityConfig { allowed_origins },
        })
    }
}
