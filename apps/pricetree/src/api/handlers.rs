//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every handler takes the catalog lock for exactly one core operation.

use super::{
    AppState,
    types::{
        EmptyResponse, ErrorResponse, HealthResponse, ImportRequest, MessageResponse,
        SalesQuery, SalesResponse, StatusResponse,
    },
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pricetree_core::{CatalogMetrics, NodeId};

// =============================================================================
// ERROR RESPONSES
// =============================================================================

fn validation_failed() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::validation_failed()),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found())).into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get catalog status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.read().await;
    let metrics = CatalogMetrics::from_catalog(&catalog);

    let response = StatusResponse {
        node_count: metrics.node_count,
        category_count: metrics.category_count,
        offer_count: metrics.offer_count,
        root_count: metrics.root_count,
        max_depth: metrics.max_depth,
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// IMPORT HANDLER
// =============================================================================

/// Import a batch of categories and offers.
///
/// Malformed JSON, wrong field types and unknown node types are all
/// reported as 400 with the same body, as are structural failures.
pub async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Import rejected: undecodable body");
            return validation_failed();
        }
    };

    let batch = match request.to_batch() {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(error = %e, "Import rejected");
            return validation_failed();
        }
    };

    let mut catalog = state.catalog.write().await;
    match catalog.import_batch(&batch) {
        Ok(summary) => {
            tracing::info!(
                items = batch.items.len(),
                created = summary.created,
                updated = summary.updated,
                touched_ancestors = summary.touched_ancestors,
                update_date = %batch.update_date,
                "Import applied"
            );
            (StatusCode::OK, Json(EmptyResponse::default())).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Import rejected");
            validation_failed()
        }
    }
}

// =============================================================================
// DELETE HANDLER
// =============================================================================

/// Delete a node and its subtree.
pub async fn delete_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = NodeId::from(id);

    let mut catalog = state.catalog.write().await;
    match catalog.delete(&id) {
        Ok(removed) => {
            tracing::info!(id = %id, removed, "Subtree deleted");
            (StatusCode::OK, Json(MessageResponse::deleted())).into_response()
        }
        Err(e) if e.is_not_found() => not_found(),
        Err(e) => {
            tracing::error!(id = %id, error = %e, "Delete failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    }
}

// =============================================================================
// NODES HANDLER
// =============================================================================

/// Get a subtree with aggregated prices.
pub async fn nodes_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = NodeId::from(id);

    let catalog = state.catalog.read().await;
    match catalog.subtree(&id) {
        Ok(view) => {
            tracing::debug!(id = %id, nodes = view.node_count(), "Subtree served");
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(e) if e.is_not_found() => not_found(),
        Err(e) => {
            tracing::error!(id = %id, error = %e, "Subtree read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    }
}

// =============================================================================
// MISSING ID HANDLER
// =============================================================================

/// `DELETE /delete/` and `GET /nodes/` without an id.
pub async fn missing_id_handler() -> Response {
    validation_failed()
}

// =============================================================================
// SALES HANDLER
// =============================================================================

/// List every node with its last update date.
///
/// The `date` parameter is required but not applied as a filter.
pub async fn sales_handler(
    State(state): State<AppState>,
    query: Result<Query<SalesQuery>, QueryRejection>,
) -> Response {
    let date = match query {
        Ok(Query(SalesQuery { date: Some(date) })) if !date.is_empty() => date,
        _ => return validation_failed(),
    };

    let catalog = state.catalog.read().await;
    let items = catalog.stamps();
    tracing::info!(date = %date, nodes = items.len(), "Sales enumeration served");

    (StatusCode::OK, Json(SalesResponse { items })).into_response()
}
