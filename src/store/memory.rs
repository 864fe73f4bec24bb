//! In-process product store
//!
//! Holds records in a map behind a lock. Used by tests and by `serve --memory`
//! for running without a database. Ids, ordering and validation match the
//! MongoDB backend.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::product::{now_millis, validate_new, validate_update, Product};

use super::errors::{StoreError, StoreResult};
use super::id::ProductId;
use super::ProductStore;

struct Entry {
    /// Insertion sequence, breaks createdAt ties in listings
    seq: u64,
    product: Product,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    records: HashMap<ProductId, Entry>,
}

/// Product store backed by process memory
#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn ensure_connected(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<&Entry> = inner.records.values().collect();
        entries.sort_by(|a, b| {
            b.product
                .created_at
                .cmp(&a.product.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(entries.into_iter().map(|e| e.product.clone()).collect())
    }

    async fn get(&self, id: &str) -> StoreResult<Product> {
        let id = ProductId::parse(id)?;
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .records
            .get(&id)
            .map(|e| e.product.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, candidate: &Map<String, Value>) -> StoreResult<Product> {
        let fields = validate_new(candidate)?;
        let id = ProductId::generate();
        let product = Product::create(id.to_string(), fields, now_millis());

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(
            id,
            Entry {
                seq,
                product: product.clone(),
            },
        );
        debug!(id = %id, "stored product in memory");
        Ok(product)
    }

    async fn update(&self, id: &str, changes: &Map<String, Value>) -> StoreResult<Product> {
        let id = ProductId::parse(id)?;
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let entry = inner.records.get_mut(&id).ok_or(StoreError::NotFound)?;

        let fields = validate_update(&entry.product, changes)?;
        entry.product.apply(fields, now_millis());
        Ok(entry.product.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = ProductId::parse(id)?;
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: &str) -> Map<String, Value> {
        json!({
            "name": name,
            "description": "test item",
            "price": 5,
            "quantity": 2
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = MemoryProductStore::new();
        let product = store.create(&payload("Bolt")).await.unwrap();

        assert!(ProductId::parse(&product.id).is_ok());
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_validation_writes_nothing() {
        let store = MemoryProductStore::new();
        let mut body = payload("Bolt");
        body.insert("price".into(), json!(-3));

        let err = store.create(&body).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_record() {
        let store = MemoryProductStore::new();
        let created = store.create(&payload("Nut")).await.unwrap();

        let changes = json!({"quantity": 0.5}).as_object().cloned().unwrap();
        let err = store.update(&created.id, &changes).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let current = store.get(&created.id).await.unwrap();
        assert_eq!(current, created);
    }

    #[tokio::test]
    async fn test_list_breaks_timestamp_ties_by_insertion() {
        let store = MemoryProductStore::new();
        for name in ["a", "b", "c"] {
            store.create(&payload(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let store = MemoryProductStore::new();
        let created = store.create(&payload("Gear")).await.unwrap();

        store.delete(&created.id).await.unwrap();
        assert!(matches!(store.get(&created.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete(&created.id).await, Err(StoreError::NotFound)));
        assert!(store.is_empty());
    }
}
