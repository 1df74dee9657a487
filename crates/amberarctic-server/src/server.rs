//! HTTP server implementation.
//!
//! Built on Hyper and Tokio: a TCP listener feeds an accept loop, each
//! connection runs on its own task, and requests route through a flat
//! method-and-path table to the handlers. Preflight requests are answered
//! before routing; every response carries permissive CORS headers.
//!
//! Requests are independent and stateless apart from the shared store
//! handle in [`AppState`]; no coordination happens between them.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpListener;

use amberarctic_core::{ApiError, ApiResult};

use crate::config::AppConfig;
use crate::cors::Cors;
use crate::handlers;
use crate::response::{error_response, json_response, HttpResponse};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};
use crate::state::AppState;

/// Default timeout for body collection and handler execution.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default graceful shutdown timeout.
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Server startup and I/O errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("Bind error: {0}")]
    Bind(String),

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(String),
}

/// The Amberarctic HTTP server.
pub struct ApiServer {
    addr: String,
    state: AppState,
    cors: Cors,
    request_timeout: Duration,
    shutdown_timeout: Duration,
}

impl ApiServer {
    /// Creates a server from configuration and shared state.
    #[must_use]
    pub fn new(config: &AppConfig, state: AppState) -> Self {
        Self {
            addr: config.bind_addr(),
            state,
            cors: Cors::permissive(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// Runs the server until SIGTERM or SIGINT.
    pub async fn run(self) -> Result<(), ServerError> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Runs the server with a caller-controlled shutdown signal.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr: std::net::SocketAddr = self
            .addr
            .parse()
            .map_err(|e| ServerError::Bind(format!("Invalid address '{}': {e}", self.addr)))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!("Server listening on {addr}");

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&server);
                            let token = tracker.acquire();
                            let shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn({
                                    let server = Arc::clone(&server);
                                    move |req: Request<Incoming>| {
                                        let server = Arc::clone(&server);
                                        async move { server.handle_request(req).await }
                                    }
                                });

                                let conn = http1::Builder::new().serve_connection(io, service);
                                tokio::select! {
                                    result = conn => {
                                        if let Err(e) = result {
                                            tracing::error!("Connection error from {remote_addr}: {e}");
                                        }
                                    }
                                    () = shutdown.recv() => {
                                        tracing::debug!("Connection from {remote_addr} closed due to shutdown");
                                    }
                                }
                                drop(token);
                            });
                        }
                        Err(e) => {
                            tracing::error!("Failed to accept connection: {e}");
                        }
                    }
                }

                () = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        tracing::info!(
            "Waiting up to {:?} for {} connections to close",
            server.shutdown_timeout,
            tracker.active_connections()
        );
        tokio::select! {
            () = tracker.wait_for_idle() => {
                tracing::info!("All connections closed");
            }
            () = tokio::time::sleep(server.shutdown_timeout) => {
                tracing::warn!(
                    "Shutdown timeout reached, {} connections still active",
                    tracker.active_connections()
                );
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Handles a single HTTP request end to end.
    async fn handle_request(
        self: &Arc<Self>,
        req: Request<Incoming>,
    ) -> Result<HttpResponse, Infallible> {
        if self.cors.is_preflight(&req) {
            return Ok(self.cors.preflight_response());
        }

        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(ToString::to_string);

        tracing::debug!("{method} {path}");

        let body = match tokio::time::timeout(self.request_timeout, collect_body(req)).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                tracing::error!("Failed to collect request body: {e}");
                let err = ApiError::validation(format!("Failed to read request body: {e}"));
                let mut response = error_response(&err);
                self.cors.apply(&mut response);
                return Ok(response);
            }
            Err(_) => {
                tracing::warn!("Request body collection timed out");
                let mut response = timeout_response(StatusCode::REQUEST_TIMEOUT);
                self.cors.apply(&mut response);
                return Ok(response);
            }
        };

        let dispatched = tokio::time::timeout(
            self.request_timeout,
            dispatch(&self.state, &method, &path, query.as_deref(), &body),
        )
        .await;

        let mut response = match dispatched {
            Ok(Ok(value)) => json_response(StatusCode::OK, &value),
            Ok(Err(err)) => {
                if err.status_code().is_server_error() {
                    tracing::error!("{method} {path} failed: {err}");
                }
                error_response(&err)
            }
            Err(_) => {
                tracing::warn!("Handler execution timed out for {method} {path}");
                timeout_response(StatusCode::GATEWAY_TIMEOUT)
            }
        };

        self.cors.apply(&mut response);
        Ok(response)
    }
}

/// Routes a request to its handler.
///
/// Paths are flat; the only dynamic segments are the product slug lookups.
/// A method mismatch on a known path falls through to 404, matching the
/// original route table.
pub(crate) async fn dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &Bytes,
) -> ApiResult<serde_json::Value> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        (&Method::GET, []) => handlers::root(),
        (&Method::GET, ["test"]) => handlers::diagnostics(state).await,
        (&Method::POST, ["seed"]) => handlers::seed(state).await,
        (&Method::GET, ["products"]) => handlers::list_products(state, query).await,
        (&Method::GET, ["products", slug]) => handlers::get_product(state, slug).await,
        (&Method::GET, ["reviews", slug]) => handlers::list_reviews(state, slug).await,
        (&Method::POST, ["reviews"]) => handlers::submit_review(state, body).await,
        (&Method::POST, ["contact"]) => handlers::submit_contact(state, body).await,
        (&Method::POST, ["size", "recommend"]) => handlers::recommend(body),
        (&Method::POST, ["checkout"]) => handlers::checkout(state, body).await,
        _ => Err(ApiError::not_found(format!("No route for {method} {path}"))),
    }
}

/// Collects the request body into bytes.
async fn collect_body(req: Request<Incoming>) -> Result<Bytes, hyper::Error> {
    let collected = req.into_body().collect().await?;
    Ok(collected.to_bytes())
}

/// Builds a timeout error response.
fn timeout_response(status: StatusCode) -> HttpResponse {
    json_response(
        status,
        &serde_json::json!({
            "error": { "code": "REQUEST_TIMEOUT", "message": "Request timed out" }
        }),
    )
}
