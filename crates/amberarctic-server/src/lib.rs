//! HTTP server for the Amberarctic storefront API.
//!
//! Exposes the catalog, review, contact, size recommendation and checkout
//! endpoints over a Hyper HTTP/1.1 server, backed by any
//! [`DocumentStore`](amberarctic_store::DocumentStore) implementation.
//! When no store is configured the server still starts and serves the
//! endpoints that do not need one.
//!
//! # Example
//!
//! ```no_run
//! use amberarctic_server::config::AppConfig;
//! use amberarctic_server::server::ApiServer;
//! use amberarctic_server::state::AppState;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let state = AppState::new(None, &config);
//! ApiServer::new(&config, state).run().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod cors;
pub mod logging;
pub mod server;
pub mod state;

mod diagnostics;
mod handlers;
mod response;
mod seed;
mod shutdown;

pub use shutdown::ShutdownSignal;
