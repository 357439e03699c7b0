//! # Core Type Definitions
//!
//! This module contains all core types for the pricetree catalog:
//! - Node identity and kind (`NodeId`, `NodeKind`)
//! - Stored nodes and import payloads (`Node`, `ImportItem`, `ImportBatch`)
//! - Read-side structures (`TreeView`, `NodeStamp`, `BatchSummary`)
//! - Error types (`CatalogError`)
//!
//! ## Determinism Guarantees
//!
//! - Identifiers implement `Ord` so tables and child sets live in `BTreeMap`/`BTreeSet`
//! - Prices are integers; aggregation never touches floating point

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique, client-chosen identifier of a catalog node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new identifier.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// The two kinds of catalog entries.
///
/// Categories may own children and have a derived price.
/// Offers are leaves with a client-supplied price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Category,
    Offer,
}

impl NodeKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "CATEGORY",
            Self::Offer => "OFFER",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CATEGORY" => Ok(Self::Category),
            "OFFER" => Ok(Self::Offer),
            other => Err(CatalogError::MalformedItem(format!(
                "unknown type `{}`",
                other
            ))),
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

/// A node as held in the catalog table.
///
/// `children` is owned by the store and never taken from client payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub parent_id: Option<NodeId>,
    /// Authoritative for offers. Ignored for categories.
    pub price: Option<i64>,
    pub date: String,
    pub children: BTreeSet<NodeId>,
}

impl Node {
    /// Build a stored node from an import item.
    ///
    /// The caller supplies the carried-forward child set and the batch date.
    #[must_use]
    pub fn from_item(item: &ImportItem, children: BTreeSet<NodeId>, date: &str) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            kind: item.kind,
            parent_id: item.parent_id.clone(),
            price: item.price,
            date: date.to_string(),
            children,
        }
    }

    /// Whether this node is a root of the forest.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// =============================================================================
// IMPORT PAYLOADS
// =============================================================================

/// One node payload inside an import batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub parent_id: Option<NodeId>,
    pub price: Option<i64>,
}

impl ImportItem {
    /// Create a category payload.
    #[must_use]
    pub fn category(id: impl Into<NodeId>, name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Category,
            parent_id: parent.map(NodeId::from),
            price: None,
        }
    }

    /// Create an offer payload.
    #[must_use]
    pub fn offer(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        parent: Option<&str>,
        price: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Offer,
            parent_id: parent.map(NodeId::from),
            price: Some(price),
        }
    }
}

/// An ordered batch of payloads sharing one update timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBatch {
    pub items: Vec<ImportItem>,
    pub update_date: String,
}

impl ImportBatch {
    /// Create a new batch.
    #[must_use]
    pub fn new(items: Vec<ImportItem>, update_date: impl Into<String>) -> Self {
        Self {
            items,
            update_date: update_date.into(),
        }
    }
}

/// Outcome of a successfully applied batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items that did not exist before the batch.
    pub created: usize,
    /// Items that replaced an existing node.
    pub updated: usize,
    /// Ancestors whose date was bumped without being part of the batch.
    pub touched_ancestors: usize,
}

// =============================================================================
// READ-SIDE STRUCTURES
// =============================================================================

/// A read-only, materialized copy of a node and its descendants.
///
/// `children` is `None` for a childless offer and `Some` (possibly empty)
/// for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeView {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub parent_id: Option<NodeId>,
    pub price: i64,
    pub date: String,
    pub children: Option<Vec<TreeView>>,
}

impl TreeView {
    /// Find a view by id anywhere in this subtree.
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&TreeView> {
        if &self.id == id {
            return Some(self);
        }
        self.children
            .iter()
            .flatten()
            .find_map(|child| child.find(id))
    }

    /// Number of views in this subtree, including self.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(TreeView::node_count)
            .sum::<usize>()
    }
}

/// Identifier and last update date of a stored node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStamp {
    pub id: NodeId,
    pub date: String,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the catalog.
///
/// The core never panics; every failure is reported through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// An import item or batch failed content validation.
    #[error("Malformed item: {0}")]
    MalformedItem(String),

    /// An item references a parent that is neither stored nor earlier in the batch.
    #[error("Unknown parent {parent} for node {id}")]
    UnknownParent { id: NodeId, parent: NodeId },

    /// An item names an offer as its parent.
    #[error("Parent {parent} of node {id} is an offer")]
    ParentIsOffer { id: NodeId, parent: NodeId },

    /// A node with children cannot become an offer.
    #[error("Node {0} has children and cannot be an offer")]
    OfferHasChildren(NodeId),

    /// Linking would make a node its own ancestor.
    #[error("Cycle detected at node {0}")]
    CycleDetected(NodeId),

    /// The requested node was not found in the catalog.
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// A node would sit, or a subtree reaches, deeper than the tree depth limit.
    #[error("Tree depth exceeds limit of {0}")]
    DepthExceeded(usize),

    /// An I/O error occurred (CLI file handling).
    #[error("I/O error: {0}")]
    Io(String),
}

impl CatalogError {
    /// Whether this error means the target id is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
