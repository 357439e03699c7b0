//! # Catalog Metrics
//!
//! Shape statistics for a catalog, used by status reporting.

use crate::catalog::{Catalog, CatalogStore};
use crate::{NodeId, NodeKind};

/// Counts and depth of the catalog forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogMetrics {
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of CATEGORY nodes.
    pub category_count: usize,
    /// Number of OFFER nodes.
    pub offer_count: usize,
    /// Number of nodes without a parent.
    pub root_count: usize,
    /// Length of the longest root-to-node chain, counting edges.
    pub max_depth: usize,
}

impl CatalogMetrics {
    /// Compute metrics from a catalog.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut metrics = Self {
            node_count: catalog.node_count(),
            ..Self::default()
        };

        for node in catalog.nodes() {
            match node.kind {
                NodeKind::Category => metrics.category_count += 1,
                NodeKind::Offer => metrics.offer_count += 1,
            }
        }

        let roots: Vec<&NodeId> = catalog.roots().map(|n| &n.id).collect();
        metrics.root_count = roots.len();
        metrics.max_depth = max_depth(catalog, &roots);

        metrics
    }
}

/// Iterative depth-first walk from every root.
fn max_depth(catalog: &Catalog, roots: &[&NodeId]) -> usize {
    let mut deepest = 0usize;
    let mut stack: Vec<(&NodeId, usize)> = roots.iter().map(|r| (*r, 0)).collect();

    while let Some((id, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        if let Some(node) = catalog.lookup(id) {
            stack.extend(
                node.children
                    .iter()
                    .map(|child| (child, depth.saturating_add(1))),
            );
        }
    }

    deepest
}
