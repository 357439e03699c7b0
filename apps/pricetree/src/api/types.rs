//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Structural checks (required fields, primitive types) happen when serde
//! decodes these types; content checks happen in the core importer.

use pricetree_core::{CatalogError, ImportBatch, ImportItem, NodeId, NodeKind, NodeStamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Catalog status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub node_count: usize,
    pub category_count: usize,
    pub offer_count: usize,
    pub root_count: usize,
    pub max_depth: usize,
}

// =============================================================================
// IMPORT REQUEST
// =============================================================================

/// Body of `POST /imports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub items: Vec<ImportItemRequest>,
    pub update_date: String,
}

/// One item of an import request.
///
/// `parentId` may be absent or `null`; `price` may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItemRequest {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
}

impl ImportRequest {
    /// Convert to a core batch, rejecting unknown node types.
    pub fn to_batch(&self) -> Result<ImportBatch, CatalogError> {
        let items = self
            .items
            .iter()
            .map(ImportItemRequest::to_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ImportBatch::new(items, self.update_date.clone()))
    }
}

impl ImportItemRequest {
    /// Convert to a core import item.
    pub fn to_item(&self) -> Result<ImportItem, CatalogError> {
        let kind: NodeKind = self.kind.parse()?;
        Ok(ImportItem {
            id: NodeId::new(&self.id),
            name: self.name.clone(),
            kind,
            parent_id: self.parent_id.as_deref().map(NodeId::from),
            price: self.price,
        })
    }
}

// =============================================================================
// GENERIC RESPONSES
// =============================================================================

/// Empty JSON object returned by a successful import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyResponse {}

/// Acknowledgement with a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted() -> Self {
        Self {
            message: "all deleted".to_string(),
        }
    }
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn validation_failed() -> Self {
        Self {
            code: 400,
            message: "Validation Failed".to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            code: 404,
            message: "Item not found".to_string(),
        }
    }

    pub fn too_many_requests() -> Self {
        Self {
            code: 429,
            message: "Too Many Requests".to_string(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: 500,
            message: msg.into(),
        }
    }
}

// =============================================================================
// SALES QUERY/RESPONSE
// =============================================================================

/// Query string of `GET /sales`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesQuery {
    pub date: Option<String>,
}

/// Every stored node with its last update date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesResponse {
    pub items: Vec<NodeStamp>,
}
