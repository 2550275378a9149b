use crate::models::{Brand, Company, EndUser, Product, Warranty};
use futures::TryStreamExt;
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for warranty-service");

        // Company slugs address tenants; they must be unique.
        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(
                IndexOptions::builder()
                    .name("company_slug_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        self.companies()
            .create_index(slug_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create slug index on companies collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on companies.slug");

        // Custom domains map onto tenants too; sparse since most companies
        // have none.
        let domain_index = IndexModel::builder()
            .keys(doc! { "custom_domain": 1 })
            .options(
                IndexOptions::builder()
                    .name("company_custom_domain_unique".to_string())
                    .unique(true)
                    .sparse(true)
                    .build(),
            )
            .build();
        self.companies()
            .create_index(domain_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create custom_domain index on companies collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created unique sparse index on companies.custom_domain");

        // Company-scoped compound indexes; every query filters on company_id.
        let scoped = [
            (self.brands().name().to_string(), doc! { "company_id": 1, "name": 1 }),
            (self.products().name().to_string(), doc! { "company_id": 1, "brand_id": 1 }),
            (
                self.warranties().name().to_string(),
                doc! { "company_id": 1, "customer_email": 1 },
            ),
            (self.end_users().name().to_string(), doc! { "company_id": 1, "email": 1 }),
        ];
        for (collection, keys) in scoped {
            let index = IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .name(format!("{}_company_scope", collection))
                        .build(),
                )
                .build();
            self.db
                .collection::<mongodb::bson::Document>(&collection)
                .create_index(index, None)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to create company scope index on {} collection: {}",
                        collection,
                        e
                    );
                    AppError::from(e)
                })?;
            tracing::info!(collection = %collection, "Created company scope index");
        }

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    // ==================== Company lookups ====================

    pub async fn find_company_by_slug(&self, slug: &str) -> Result<Option<Company>, AppError> {
        self.companies()
            .find_one(doc! { "slug": slug }, None)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_company_by_domain(&self, domain: &str) -> Result<Option<Company>, AppError> {
        self.companies()
            .find_one(doc! { "custom_domain": domain }, None)
            .await
            .map_err(AppError::from)
    }

    // ==================== Company-scoped queries ====================

    pub async fn list_brands(&self, company_id: &str) -> Result<Vec<Brand>, AppError> {
        let cursor = self
            .brands()
            .find(doc! { "company_id": company_id }, None)
            .await
            .map_err(AppError::from)?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    pub async fn list_products(&self, company_id: &str) -> Result<Vec<Product>, AppError> {
        let cursor = self
            .products()
            .find(doc! { "company_id": company_id }, None)
            .await
            .map_err(AppError::from)?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    pub async fn list_warranties_for_customer(
        &self,
        company_id: &str,
        customer_email: &str,
    ) -> Result<Vec<Warranty>, AppError> {
        let cursor = self
            .warranties()
            .find(
                doc! { "company_id": company_id, "customer_email": customer_email },
                None,
            )
            .await
            .map_err(AppError::from)?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    pub async fn count_brands(&self, company_id: &str) -> Result<u64, AppError> {
        self.brands()
            .count_documents(doc! { "company_id": company_id }, None)
            .await
            .map_err(AppError::from)
    }

    pub async fn count_products(&self, company_id: &str) -> Result<u64, AppError> {
        self.products()
            .count_documents(doc! { "company_id": company_id }, None)
            .await
            .map_err(AppError::from)
    }

    pub async fn count_warranties(&self, company_id: &str) -> Result<u64, AppError> {
        self.warranties()
            .count_documents(doc! { "company_id": company_id }, None)
            .await
            .map_err(AppError::from)
    }

    // ==================== Collections ====================

    pub fn companies(&self) -> Collection<Company> {
        self.db.collection("companies")
    }

    pub fn brands(&self) -> Collection<Brand> {
        self.db.collection("brands")
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection("products")
    }

    pub fn warranties(&self) -> Collection<Warranty> {
        self.db.collection("warranties")
    }

    pub fn end_users(&self) -> Collection<EndUser> {
        self.db.collection("end_users")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
