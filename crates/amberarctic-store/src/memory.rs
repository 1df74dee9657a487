//! In-memory document store.
//!
//! [`MemoryStore`] keeps documents in a per-collection map guarded by an
//! async `RwLock` and evaluates the same structural filters as the MongoDB
//! adapter. It backs handler tests and makes local development possible
//! without a running database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use tokio::sync::RwLock;

use crate::filter;
use crate::{DocumentStore, StoreError};

/// An in-process [`DocumentStore`] with MongoDB-compatible filter semantics.
///
/// Generated ids are sequential strings (`mem-1`, `mem-2`, ...).
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, StoreError> {
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        document.insert("_id", Bson::String(id.clone()));

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter::matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        let document = collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter::matches(d, &filter)).cloned());
        Ok(document)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.collections.read().await.keys().cloned().collect())
    }
}
