//! Backend diagnostics report.
//!
//! Backs the `/test` endpoint. Unlike every other handler this one never
//! fails: each internal problem is captured into a descriptive response
//! field so the report stays useful even when the store is completely
//! unavailable. Error detail is truncated so driver messages stay short
//! and never leak connection strings.

use serde::Serialize;

use amberarctic_core::truncate;

use crate::state::AppState;

/// Maximum length of an error detail in the report.
const ERROR_DETAIL_LIMIT: usize = 60;

/// Diagnostics for the backend and its store connection.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DiagnosticsReport {
    /// Backend process status.
    pub backend: String,
    /// Store status, including captured error detail on failure.
    pub database: String,
    /// Whether `DATABASE_URL` was set.
    pub database_url: String,
    /// Whether `DATABASE_NAME` was set.
    pub database_name: String,
    /// Connection status summary.
    pub connection_status: String,
    /// Collection names, when listing succeeds.
    pub collections: Vec<String>,
}

fn set_marker(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

/// Builds the diagnostics report. Infallible by design.
pub async fn report(state: &AppState) -> DiagnosticsReport {
    let mut report = DiagnosticsReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_marker(state.database_url_set),
        database_name: set_marker(state.database_name_set),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(store) = state.store.as_ref() else {
        return report;
    };

    report.connection_status = "Connected".to_string();
    match store.list_collections().await {
        Ok(names) => {
            report.collections = names;
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            let detail = e.to_string();
            report.database = format!(
                "⚠️ Connected but Error: {}",
                truncate(&detail, ERROR_DETAIL_LIMIT)
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use amberarctic_store::bson::doc;
    use amberarctic_store::{DocumentStore, MemoryStore, StoreError};
    use async_trait::async_trait;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_degraded_report() {
        let report = report(&AppState::degraded()).await;
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "❌ Not Available");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn test_connected_report_lists_collections() {
        let store = Arc::new(MemoryStore::new());
        store.insert("product", doc! { "slug": "a" }).await.unwrap();

        let state = AppState::with_store(store);
        let report = report(&state).await;
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections, vec!["product".to_string()]);
    }

    /// Store whose introspection always fails, to exercise the captured
    /// error path.
    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl DocumentStore for BrokenStore {
        async fn insert(
            &self,
            _collection: &str,
            _document: amberarctic_store::bson::Document,
        ) -> Result<String, StoreError> {
            Err(StoreError::Unavailable)
        }

        async fn find(
            &self,
            _collection: &str,
            _filter: amberarctic_store::bson::Document,
        ) -> Result<Vec<amberarctic_store::bson::Document>, StoreError> {
            Err(StoreError::Unavailable)
        }

        async fn find_one(
            &self,
            _collection: &str,
            _filter: amberarctic_store::bson::Document,
        ) -> Result<Option<amberarctic_store::bson::Document>, StoreError> {
            Err(StoreError::Unavailable)
        }

        async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Backend("x".repeat(500)))
        }
    }

    #[tokio::test]
    async fn test_listing_failure_is_captured_and_truncated() {
        let state = AppState::with_store(Arc::new(BrokenStore));
        let report = report(&state).await;
        assert!(report.database.starts_with("⚠️ Connected but Error:"));
        // 60-char cap on the captured detail.
        assert!(report.database.len() < 120);
        assert!(report.collections.is_empty());
    }
}
