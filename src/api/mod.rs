//! HTTP API server.
//!
//! Thin glue over the core modules: one axum router, JSON in and out,
//! a CORS allow-list, and Prometheus counters on `/metrics`. Requests
//! are independent; there is no cross-request coordination.

mod config;
mod error;
mod routes;

pub use config::{ConfigError, FileConfig, ServerConfig};
pub use error::ApiError;
pub use routes::AppState;

use crate::metrics::{MetricsError, MetricsRegistry};
use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Errors that can occur during server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid CORS origin {origin:?}")]
    InvalidOrigin { origin: String },

    #[error("metrics initialization failed: {0}")]
    Metrics(#[from] MetricsError),

    #[error("server error: {0}")]
    Server(String),
}

/// The key generation API server.
pub struct ApiServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server from a validated configuration.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;
        let state = Arc::new(AppState {
            metrics: MetricsRegistry::new()?,
        });
        Ok(Self { config, state })
    }

    /// Builds the router with all routes and the CORS layer applied.
    pub fn router(&self) -> Result<Router, ServerError> {
        let cors = cors_layer(&self.config)?;
        Ok(routes::router(Arc::clone(&self.state)).layer(cors))
    }

    /// Starts the HTTP server.
    ///
    /// Runs until a shutdown signal (ctrl-c) is received.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = self.router()?;
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!(
            addr = %self.config.bind_addr,
            origins = ?self.config.allowed_origins,
            "API server listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;

        Ok(())
    }
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ServerError> {
    if config.allowed_origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ServerError::InvalidOrigin {
                    origin: origin.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::warn!("Failed to listen for shutdown signal: {}", e),
    }
}
