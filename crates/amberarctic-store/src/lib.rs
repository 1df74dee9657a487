//! # Amberarctic Store
//!
//! Document store adapter for the Amberarctic backend.
//!
//! The [`DocumentStore`] trait exposes collection-scoped insert and query
//! operations over BSON documents. Two implementations are provided:
//!
//! - [`MongoStore`] - the production MongoDB adapter, holding a single
//!   process-wide connection
//! - [`MemoryStore`] - an in-process adapter honoring the same filter
//!   semantics, used in tests and degraded local development
//!
//! Filters are structural: exact field equality, `{"$in": [..]}` membership
//! (array fields match when any element is in the list), and `{"$lte": n}`
//! numeric range. Every document returned by an adapter has its `_id`
//! rendered as a plain string before it crosses the crate boundary.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod filter;
mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use amberarctic_core::ApiError;

// Re-exported so callers can build filters and documents without a direct
// driver dependency.
pub use mongodb::bson;
use mongodb::bson::{Bson, Document};

/// Errors produced by a document store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store was never connected (degraded mode).
    #[error("document store is not available")]
    Unavailable,

    /// The backend rejected or failed the operation.
    #[error("document store backend error: {0}")]
    Backend(String),

    /// A value could not be encoded as a BSON document.
    #[error("failed to encode document: {0}")]
    Encode(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::storage(err.to_string())
    }
}

/// Collection-scoped insert and query operations against a document store.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// concurrently; the store itself is the only shared mutable resource in
/// the system.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Inserts a document and returns its generated identifier as a string.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Returns every document in `collection` matching `filter`.
    ///
    /// Returned documents have `_id` rendered as a plain string.
    async fn find(&self, collection: &str, filter: Document)
        -> Result<Vec<Document>, StoreError>;

    /// Returns the first document in `collection` matching `filter`, if any.
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Lists collection names; used for liveness introspection only.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}

/// Encodes a serializable value as a BSON document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    bson::to_document(value).map_err(|e| StoreError::Encode(e.to_string()))
}

/// Rewrites the document's `_id` as a plain string.
///
/// ObjectIds become their hex form; other id types fall back to their
/// display rendering. Documents without an `_id` are left untouched.
pub fn stringify_id(document: &mut Document) {
    let Some(id) = document.get("_id").cloned() else {
        return;
    };
    let rendered = match id {
        Bson::String(s) => s,
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    };
    document.insert("_id", Bson::String(rendered));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn test_stringify_object_id() {
        let oid = ObjectId::new();
        let mut document = doc! { "_id": oid, "slug": "arctic-edge-pro" };
        stringify_id(&mut document);
        assert_eq!(document.get_str("_id").unwrap(), oid.to_hex());
    }

    #[test]
    fn test_stringify_id_noop_without_id() {
        let mut document = doc! { "slug": "arctic-edge-pro" };
        stringify_id(&mut document);
        assert!(document.get("_id").is_none());
    }

    #[test]
    fn test_stringify_id_preserves_strings() {
        let mut document = doc! { "_id": "mem-7" };
        stringify_id(&mut document);
        assert_eq!(document.get_str("_id").unwrap(), "mem-7");
    }

    #[test]
    fn test_to_document() {
        #[derive(serde::Serialize)]
        struct Probe {
            slug: String,
            price: f64,
        }
        let document = to_document(&Probe {
            slug: "polar-stealth-lite".into(),
            price: 329.0,
        })
        .unwrap();
        assert_eq!(document.get_str("slug").unwrap(), "polar-stealth-lite");
        assert!((document.get_f64("price").unwrap() - 329.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_store_error_maps_to_storage_api_error() {
        let err: ApiError = StoreError::Backend("connection reset".into()).into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.to_string().contains("connection reset"));
    }
}
