//! Amberarctic storefront API server binary.

use std::sync::Arc;

use amberarctic_server::config::AppConfig;
use amberarctic_server::logging::init_logging;
use amberarctic_server::server::ApiServer;
use amberarctic_server::state::AppState;
use amberarctic_store::{DocumentStore, MongoStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log)?;

    let store = connect_store(&config).await;
    if store.is_none() {
        tracing::warn!("Running in degraded mode: store-backed endpoints will fail");
    }

    let state = AppState::new(store, &config);
    ApiServer::new(&config, state).run().await?;
    Ok(())
}

/// Connects to MongoDB when configured; otherwise degrades gracefully.
async fn connect_store(config: &AppConfig) -> Option<Arc<dyn DocumentStore>> {
    let (Some(url), Some(name)) = (&config.database_url, &config.database_name) else {
        tracing::warn!("DATABASE_URL or DATABASE_NAME not set");
        return None;
    };

    match MongoStore::connect(url, name).await {
        Ok(store) => {
            tracing::info!(database = %name, "Connected to MongoDB");
            Some(Arc::new(store))
        }
        Err(e) => {
            tracing::error!("Failed to create MongoDB client: {e}");
            None
        }
    }
}
