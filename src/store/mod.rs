//! Product storage for inventory
//!
//! `ProductStore` is the persistence seam: HTTP handlers depend on the
//! trait, and the process picks a backend at boot.
//!
//! # Guarantees
//!
//! - Every create and update is validated before anything is written
//! - A write touches exactly one record
//! - Listings are ordered newest first by `createdAt`
//! - Malformed ids fail with `InvalidId` before the store is consulted

mod config;
mod errors;
mod id;
mod memory;
mod mongo;

pub use config::{StoreConfig, DATABASE_ENV, URI_ENV};
pub use errors::{StoreError, StoreResult};
pub use id::ProductId;
pub use memory::MemoryProductStore;
pub use mongo::MongoProductStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::product::Product;

/// A product store.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Establishes the backing connection if it does not exist yet.
    ///
    /// Idempotent: once connected, further calls return immediately.
    async fn ensure_connected(&self) -> StoreResult<()>;

    /// All products, most recently created first
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// One product by id
    async fn get(&self, id: &str) -> StoreResult<Product>;

    /// Validates `candidate` and stores it as a new product
    async fn create(&self, candidate: &Map<String, Value>) -> StoreResult<Product>;

    /// Merges `changes` over the stored product, re-validates, and stores the result
    async fn update(&self, id: &str, changes: &Map<String, Value>) -> StoreResult<Product>;

    /// Removes a product permanently
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
