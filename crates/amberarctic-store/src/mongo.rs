//! MongoDB document store adapter.
//!
//! [`MongoStore`] wraps a single process-wide [`mongodb::Database`] handle.
//! The driver connects lazily, so construction succeeds even when the
//! database is unreachable; individual operations fail per-request instead,
//! which is what keeps the server alive in degraded mode.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::Document;
use mongodb::{Client, Database};

use crate::{stringify_id, DocumentStore, StoreError};

/// The production MongoDB-backed [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects to the database named `database_name` at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the connection string cannot be
    /// parsed. Network reachability is not verified here; the driver
    /// connects on first use.
    pub async fn connect(url: &str, database_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(database_name);
        tracing::info!(database = database_name, "Document store configured");
        Ok(Self { database })
    }

    /// Creates a store over an already-constructed database handle.
    #[must_use]
    pub fn from_database(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        let id = match result.inserted_id.as_object_id() {
            Some(oid) => oid.to_hex(),
            None => result.inserted_id.to_string(),
        };
        tracing::debug!(collection, id = %id, "Inserted document");
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(filter)
            .await?;

        let mut documents: Vec<Document> = cursor.try_collect().await?;
        for document in &mut documents {
            stringify_id(document);
        }
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut document = self
            .database
            .collection::<Document>(collection)
            .find_one(filter)
            .await?;

        if let Some(document) = document.as_mut() {
            stringify_id(document);
        }
        Ok(document)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.database.list_collection_names().await?)
    }
}
