//! Shared application state.
//!
//! One [`AppState`] is constructed at startup and shared across every
//! request (dependency injection rather than a global handle). The store
//! is optional: when the database is not configured or the client cannot
//! be constructed, the server keeps running in degraded mode and
//! store-dependent endpoints fail per-request.

use std::sync::Arc;

use amberarctic_core::{ApiError, ApiResult};
use amberarctic_store::DocumentStore;

use crate::config::AppConfig;

/// The storefront brand reported by the root endpoint.
pub const BRAND: &str = "Amberarctic";

/// Process-wide shared state, cloned cheaply per connection.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle; `None` in degraded mode.
    pub store: Option<Arc<dyn DocumentStore>>,
    /// Whether `DATABASE_URL` was set at startup (for diagnostics).
    pub database_url_set: bool,
    /// Whether `DATABASE_NAME` was set at startup (for diagnostics).
    pub database_name_set: bool,
}

impl AppState {
    /// Builds state from the loaded configuration and an optional store.
    #[must_use]
    pub fn new(store: Option<Arc<dyn DocumentStore>>, config: &AppConfig) -> Self {
        Self {
            store,
            database_url_set: config.database_url.is_some(),
            database_name_set: config.database_name.is_some(),
        }
    }

    /// Builds state around a store directly; used in tests.
    #[must_use]
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store: Some(store),
            database_url_set: true,
            database_name_set: true,
        }
    }

    /// Builds degraded-mode state with no store at all.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            store: None,
            database_url_set: false,
            database_name_set: false,
        }
    }

    /// Returns the store, or a storage error when running degraded.
    pub(crate) fn store(&self) -> ApiResult<&Arc<dyn DocumentStore>> {
        self.store
            .as_ref()
            .ok_or_else(|| ApiError::storage("document store is not configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amberarctic_store::MemoryStore;

    #[test]
    fn test_degraded_state_has_no_store() {
        let state = AppState::degraded();
        let err = state.store().unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_with_store() {
        let state = AppState::with_store(Arc::new(MemoryStore::new()));
        assert!(state.store().is_ok());
        assert!(state.database_url_set);
    }
}
