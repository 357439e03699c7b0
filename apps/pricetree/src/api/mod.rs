//! # pricetree HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /imports` - Import a batch of categories and offers
//! - `DELETE /delete/{id}` - Delete a node and its subtree
//! - `GET /nodes/{id}` - Get a subtree with aggregated prices
//! - `GET /sales?date=...` - List every node with its update date
//! - `GET /status` - Catalog metrics
//! - `GET /health` - Health check
//!
//! Configuration is read from the environment, see [`config`].

mod auth;
pub mod config;
mod handlers;
mod middleware;
mod types;

pub use config::ServerConfig;
// Re-export handlers and types for integration tests (via `pricetree::api::*`)
pub use handlers::{
    delete_handler, health_handler, import_handler, missing_id_handler, nodes_handler,
    sales_handler, status_handler,
};
pub use types::{
    EmptyResponse, ErrorResponse, HealthResponse, ImportItemRequest, ImportRequest,
    MessageResponse, SalesQuery, SalesResponse, StatusResponse,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use pricetree_core::{Catalog, CatalogError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the catalog.
///
/// Imports and deletes hold the write lock for the whole operation;
/// reads hold the read lock for the whole materialize-and-price pass.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
}

impl AppState {
    /// Create new app state around a catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - `Some("*")`: allow all origins
/// - `None`: localhost only
/// - otherwise: comma-separated list of origins
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (PRICETREE_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                cors_for(allowed)
            }
        }
        None => build_localhost_cors(),
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    cors_for(origins)
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the router with configuration read from the environment.
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(state, &ServerConfig::from_env())
}

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router_with_config(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/imports", post(handlers::import_handler))
        .route("/delete/", delete(handlers::missing_id_handler))
        .route("/delete/{id}", delete(handlers::delete_handler))
        .route("/nodes/", get(handlers::missing_id_handler))
        .route("/nodes/{id}", get(handlers::nodes_handler))
        .route("/sales", get(handlers::sales_handler));

    match &config.api_key {
        Some(key) => {
            tracing::info!("API key authentication enabled");
            router = router.layer(axum_middleware::from_fn_with_state(
                auth::ApiKey::new(key),
                auth::api_key_auth_middleware,
            ));
        }
        None => {
            tracing::warn!(
                "API key authentication DISABLED. Set PRICETREE_API_KEY to enable authentication."
            );
        }
    }

    if config.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            middleware::create_rate_limiter(config.rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(config.cors_origins.as_deref()))
                .layer(DefaultBodyLimit::max(config::MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, catalog: Catalog) -> Result<(), CatalogError> {
    let router = create_router(AppState::new(catalog));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CatalogError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("pricetree HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CatalogError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
