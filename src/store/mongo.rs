//! MongoDB product store
//!
//! The client is created on first use and reused for the life of the
//! process. A failed connection attempt is not cached, so the next request
//! retries it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::observability::{log_event_with_fields, Event};
use crate::product::{next_update_time, now_millis, validate_new, validate_update, Product};

use super::config::{StoreConfig, URI_ENV};
use super::errors::{StoreError, StoreResult};
use super::id::ProductId;
use super::ProductStore;

/// Product as persisted in the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    description: String,
    price: f64,
    #[serde(deserialize_with = "whole_number")]
    quantity: i64,
    #[serde(default = "default_category")]
    category: String,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at: bson::DateTime,
}

fn default_category() -> String {
    crate::product::DEFAULT_CATEGORY.to_string()
}

/// Older documents may carry quantity as a double.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(i64::MIN as f64..i64::MAX as f64).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "quantity {} is not a whole number",
            value
        )));
    }
    Ok(value as i64)
}

fn to_bson_time(t: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(t.timestamp_millis())
}

fn from_bson_time(t: bson::DateTime) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(t.timestamp_millis())
        .ok_or_else(|| StoreError::Unavailable(format!("timestamp out of range: {}", t)))
}

impl ProductDocument {
    fn from_product(id: ObjectId, product: &Product) -> Self {
        Self {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            category: product.category.clone(),
            created_at: to_bson_time(product.created_at),
            updated_at: to_bson_time(product.updated_at),
        }
    }

    fn into_product(self) -> StoreResult<Product> {
        Ok(Product {
            id: self.id.to_hex(),
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            category: self.category,
            created_at: from_bson_time(self.created_at)?,
            updated_at: from_bson_time(self.updated_at)?,
        })
    }
}

/// Product store backed by a MongoDB collection
pub struct MongoProductStore {
    config: StoreConfig,
    collection: OnceCell<Collection<ProductDocument>>,
}

impl MongoProductStore {
    /// Creates a store. No connection is made until first use.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            collection: OnceCell::new(),
        }
    }

    /// Whether a connection has been established
    pub fn is_connected(&self) -> bool {
        self.collection.initialized()
    }

    async fn collection(&self) -> StoreResult<&Collection<ProductDocument>> {
        self.collection.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> StoreResult<Collection<ProductDocument>> {
        let uri = self
            .config
            .uri
            .as_deref()
            .ok_or_else(|| StoreError::missing_uri(URI_ENV))?;

        info!(uri = ?self.config.masked_uri(), "connecting to MongoDB");

        let result = async {
            let client = Client::with_uri_str(uri).await?;
            let db = client
                .default_database()
                .unwrap_or_else(|| client.database(&self.config.database));
            db.run_command(doc! { "ping": 1 }).await?;
            Ok::<_, mongodb::error::Error>(db)
        }
        .await;

        match result {
            Ok(db) => {
                log_event_with_fields(
                    Event::StoreConnected,
                    &[("database", db.name()), ("collection", self.config.collection.as_str())],
                );
                Ok(db.collection::<ProductDocument>(&self.config.collection))
            }
            Err(e) => {
                error!(error = %e, "MongoDB connection failed");
                Err(StoreError::from(e))
            }
        }
    }

    async fn find(&self, id: ProductId) -> StoreResult<Product> {
        let collection = self.collection().await?;
        collection
            .find_one(doc! { "_id": id.object_id() })
            .await?
            .ok_or(StoreError::NotFound)?
            .into_product()
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn ensure_connected(&self) -> StoreResult<()> {
        self.collection().await.map(|_| ())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let collection = self.collection().await?;
        let documents: Vec<ProductDocument> = collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?
            .try_collect()
            .await?;
        debug!(count = documents.len(), "listed products");
        documents
            .into_iter()
            .map(ProductDocument::into_product)
            .collect()
    }

    async fn get(&self, id: &str) -> StoreResult<Product> {
        let id = ProductId::parse(id)?;
        self.find(id).await
    }

    async fn create(&self, candidate: &Map<String, Value>) -> StoreResult<Product> {
        let fields = validate_new(candidate)?;
        let collection = self.collection().await?;

        let id = ProductId::generate();
        let product = Product::create(id.to_string(), fields, now_millis());
        collection
            .insert_one(ProductDocument::from_product(id.object_id(), &product))
            .await?;
        Ok(product)
    }

    async fn update(&self, id: &str, changes: &Map<String, Value>) -> StoreResult<Product> {
        let id = ProductId::parse(id)?;
        let existing = self.find(id).await?;
        let fields = validate_update(&existing, changes)?;
        let updated_at = next_update_time(existing.updated_at, now_millis());

        let collection = self.collection().await?;
        let update = doc! {
            "$set": {
                "name": fields.name.as_str(),
                "description": fields.description.as_str(),
                "price": fields.price,
                "quantity": fields.quantity,
                "category": fields.category.as_str(),
                "updatedAt": to_bson_time(updated_at),
            }
        };
        collection
            .find_one_and_update(doc! { "_id": id.object_id() }, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(StoreError::NotFound)?
            .into_product()
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = ProductId::parse(id)?;
        let collection = self.collection().await?;
        let result = collection.delete_one(doc! { "_id": id.object_id() }).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
