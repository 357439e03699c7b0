//! # Catalog Tree Store
//!
//! The in-memory node table for pricetree.
//!
//! This module implements the `CatalogStore` trait and the public
//! operations built on it: batch import, cascading delete, subtree
//! reads and the date enumeration used by reporting.
//! All data structures use `BTreeMap` for deterministic ordering.

use crate::aggregator::Aggregator;
use crate::importer::Importer;
use crate::{BatchSummary, CatalogError, ImportBatch, Node, NodeId, NodeStamp, TreeView};
use std::collections::BTreeMap;

// =============================================================================
// CATALOGSTORE TRAIT
// =============================================================================

/// Raw table primitives that the importer and aggregator are written against.
///
/// These do not enforce tree invariants on their own; `Importer` and
/// `Catalog::delete` are the only callers allowed to mutate through them.
pub trait CatalogStore {
    /// Lookup a node by id.
    fn lookup(&self, id: &NodeId) -> Option<&Node>;

    /// Lookup a node by id for in-place mutation.
    fn lookup_mut(&mut self, id: &NodeId) -> Option<&mut Node>;

    /// Check if a node exists.
    fn contains(&self, id: &NodeId) -> bool {
        self.lookup(id).is_some()
    }

    /// Insert or replace a node. Returns the previous node, if any.
    fn put(&mut self, node: Node) -> Option<Node>;

    /// Remove a single node without touching its relatives.
    fn take(&mut self, id: &NodeId) -> Option<Node>;

    /// Get the total number of nodes.
    fn node_count(&self) -> usize;
}

// =============================================================================
// CATALOG IMPLEMENTATION
// =============================================================================

/// The main catalog structure.
///
/// Volatile: nothing here outlives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Node storage: NodeId -> Node
    nodes: BTreeMap<NodeId, Node>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an import batch.
    ///
    /// The batch is all-or-nothing: on any error the table is left exactly
    /// as it was before the call.
    pub fn import_batch(&mut self, batch: &ImportBatch) -> Result<BatchSummary, CatalogError> {
        Importer::import_batch(self, batch)
    }

    /// Delete a node and its entire subtree.
    ///
    /// Returns the number of removed nodes.
    pub fn delete(&mut self, id: &NodeId) -> Result<usize, CatalogError> {
        let parent = self
            .nodes
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?
            .parent_id
            .clone();

        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent_node.children.remove(id);
        }

        let mut removed = 0usize;
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                removed = removed.saturating_add(1);
                stack.extend(node.children);
            }
        }

        Ok(removed)
    }

    /// Materialize the subtree rooted at `id` with aggregated prices.
    pub fn subtree(&self, id: &NodeId) -> Result<TreeView, CatalogError> {
        Aggregator::subtree(self, id)
    }

    /// Get a stored node without aggregation.
    pub fn get(&self, id: &NodeId) -> Result<&Node, CatalogError> {
        self.nodes
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Enumerate every stored node with its last update date.
    #[must_use]
    pub fn stamps(&self) -> Vec<NodeStamp> {
        self.nodes
            .values()
            .map(|n| NodeStamp {
                id: n.id.clone(),
                date: n.date.clone(),
            })
            .collect()
    }

    /// Get all nodes in deterministic order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all root nodes in deterministic order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.is_root())
    }

    /// Check whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl CatalogStore for Catalog {
    fn lookup(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn lookup_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    fn put(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    fn take(&mut self, id: &NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImportItem;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .import_batch(&ImportBatch::new(
                vec![
                    ImportItem::category("root", "Root", None),
                    ImportItem::category("phones", "Phones", Some("root")),
                    ImportItem::offer("p1", "Phone 1", Some("phones"), 100),
                    ImportItem::offer("p2", "Phone 2", Some("phones"), 200),
                    ImportItem::offer("tv", "TV", Some("root"), 900),
                ],
                "2022-02-01T12:00:00Z",
            ))
            .expect("import");
        catalog
    }

    #[test]
    fn delete_removes_whole_subtree() {
        let mut catalog = sample();

        let removed = catalog.delete(&id("phones")).expect("delete");

        assert_eq!(removed, 3);
        assert!(catalog.lookup(&id("phones")).is_none());
        assert!(catalog.lookup(&id("p1")).is_none());
        assert!(catalog.lookup(&id("p2")).is_none());
        assert!(catalog.lookup(&id("tv")).is_some());
    }

    #[test]
    fn delete_detaches_from_parent() {
        let mut catalog = sample();

        catalog.delete(&id("tv")).expect("delete");

        let root = catalog.get(&id("root")).expect("root");
        assert!(!root.children.contains(&id("tv")));
        assert!(root.children.contains(&id("phones")));
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut catalog = sample();
        let before = catalog.clone();

        let result = catalog.delete(&id("missing"));

        assert_eq!(result, Err(CatalogError::NotFound(id("missing"))));
        assert_eq!(catalog, before);
    }

    #[test]
    fn delete_root_empties_catalog() {
        let mut catalog = sample();

        assert_eq!(catalog.delete(&id("root")).expect("delete"), 5);
        assert!(catalog.is_empty());
    }

    #[test]
    fn stamps_in_deterministic_order() {
        let catalog = sample();

        let ids: Vec<_> = catalog
            .stamps()
            .into_iter()
            .map(|s| s.id.0)
            .collect();

        assert_eq!(ids, vec!["p1", "p2", "phones", "root", "tv"]);
    }

    #[test]
    fn roots_lists_only_parentless_nodes() {
        let catalog = sample();

        let roots: Vec<_> = catalog.roots().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["root"]);
    }

    #[test]
    fn get_unknown_is_not_found() {
        let catalog = Catalog::new();
        assert!(catalog.get(&id("x")).expect_err("missing").is_not_found());
    }
}
