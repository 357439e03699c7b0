//! # pricetree-core
//!
//! The in-memory catalog tree engine for pricetree - THE LOGIC.
//!
//! Categories and offers form a forest keyed by client-chosen ids.
//! This crate owns that forest and the three operations that must keep it
//! consistent:
//! - batch import with ancestor date propagation (`importer`)
//! - cascading delete (`catalog`)
//! - subtree reads with mean-price aggregation (`aggregator`)
//!
//! ## Architectural Constraints
//!
//! - Volatile: nothing is persisted, the catalog lives as long as the process
//! - Synchronous: NO async, NO network, NO locks; callers own the exclusion scope
//! - Deterministic: `BTreeMap`/`BTreeSet` only, integer arithmetic only

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregator;
pub mod catalog;
pub mod importer;
pub mod metrics;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    BatchSummary, CatalogError, ImportBatch, ImportItem, Node, NodeId, NodeKind, NodeStamp,
    TreeView,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use aggregator::{Aggregator, PriceTotals};
pub use catalog::{Catalog, CatalogStore};
pub use importer::Importer;
pub use metrics::CatalogMetrics;
