//! # Importer Module
//!
//! Batch validation and upsert protocol for the pricetree core.
//!
//! - Validate every item before the first write
//! - Carry existing child sets forward on replace
//! - Move nodes between parents without leaving stale child links
//! - Propagate the batch date up every ancestor chain
//! - Roll the whole batch back on a structural failure

use crate::catalog::CatalogStore;
use crate::primitives::{
    MAX_BATCH_SIZE, MAX_DATE_LENGTH, MAX_ID_LENGTH, MAX_NAME_LENGTH, MAX_TREE_DEPTH,
};
use crate::{BatchSummary, CatalogError, ImportBatch, ImportItem, Node, NodeId, NodeKind};
use std::collections::{BTreeMap, BTreeSet};

/// The Importer validates batches and applies them to a catalog store.
pub struct Importer;

impl Importer {
    /// Validate a single item.
    ///
    /// An item is valid if:
    /// - `id` is non-empty and within `MAX_ID_LENGTH`
    /// - `name` is non-empty and within `MAX_NAME_LENGTH`
    /// - `parent_id`, when present, is non-empty
    /// - an offer carries a non-negative price
    pub fn validate_item(item: &ImportItem) -> Result<(), CatalogError> {
        if item.id.as_str().is_empty() {
            return Err(CatalogError::MalformedItem("empty id".to_string()));
        }
        if item.id.as_str().len() > MAX_ID_LENGTH {
            return Err(CatalogError::MalformedItem(format!(
                "id length {} exceeds maximum {} bytes",
                item.id.as_str().len(),
                MAX_ID_LENGTH
            )));
        }

        if item.name.is_empty() {
            return Err(CatalogError::MalformedItem(format!(
                "empty name on {}",
                item.id
            )));
        }
        if item.name.len() > MAX_NAME_LENGTH {
            return Err(CatalogError::MalformedItem(format!(
                "name length {} exceeds maximum {} bytes",
                item.name.len(),
                MAX_NAME_LENGTH
            )));
        }

        if item
            .parent_id
            .as_ref()
            .is_some_and(|p| p.as_str().is_empty())
        {
            return Err(CatalogError::MalformedItem(format!(
                "empty parentId on {}",
                item.id
            )));
        }

        if item.kind == NodeKind::Offer {
            match item.price {
                None => {
                    return Err(CatalogError::MalformedItem(format!(
                        "offer {} has no price",
                        item.id
                    )));
                }
                Some(price) if price < 0 => {
                    return Err(CatalogError::MalformedItem(format!(
                        "offer {} has negative price {}",
                        item.id, price
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Validate a whole batch without touching any store.
    pub fn validate(batch: &ImportBatch) -> Result<(), CatalogError> {
        if batch.items.is_empty() {
            return Err(CatalogError::MalformedItem("empty batch".to_string()));
        }
        if batch.items.len() > MAX_BATCH_SIZE {
            return Err(CatalogError::MalformedItem(format!(
                "batch size {} exceeds maximum {}",
                batch.items.len(),
                MAX_BATCH_SIZE
            )));
        }

        if batch.update_date.is_empty() || batch.update_date.len() > MAX_DATE_LENGTH {
            return Err(CatalogError::MalformedItem(
                "updateDate must be a non-empty timestamp".to_string(),
            ));
        }

        batch.items.iter().try_for_each(Self::validate_item)
    }

    /// Validate and apply a batch.
    ///
    /// Items are applied in order; a later item with the same id replaces
    /// an earlier one. If any item fails a structural check the store is
    /// restored to its state before the call.
    pub fn import_batch<S: CatalogStore>(
        store: &mut S,
        batch: &ImportBatch,
    ) -> Result<BatchSummary, CatalogError> {
        Self::validate(batch)?;

        let mut journal = Journal::default();
        let mut summary = BatchSummary::default();

        for item in &batch.items {
            if let Err(e) = Self::upsert(store, item, &batch.update_date, &mut journal, &mut summary)
            {
                journal.rollback(store);
                return Err(e);
            }
        }

        Ok(summary)
    }

    /// Apply a single item.
    fn upsert<S: CatalogStore>(
        store: &mut S,
        item: &ImportItem,
        date: &str,
        journal: &mut Journal,
        summary: &mut BatchSummary,
    ) -> Result<(), CatalogError> {
        if let Some(parent) = &item.parent_id {
            let parent_node = store
                .lookup(parent)
                .ok_or_else(|| CatalogError::UnknownParent {
                    id: item.id.clone(),
                    parent: parent.clone(),
                })?;

            if parent_node.kind == NodeKind::Offer {
                return Err(CatalogError::ParentIsOffer {
                    id: item.id.clone(),
                    parent: parent.clone(),
                });
            }

            if Self::is_ancestor_or_self(store, &item.id, parent) {
                return Err(CatalogError::CycleDetected(item.id.clone()));
            }
        }

        let existing_height = if store.contains(&item.id) {
            Self::subtree_height(store, &item.id)
        } else {
            0
        };
        let depth = match &item.parent_id {
            Some(parent) => Self::depth_of(store, parent).saturating_add(1),
            None => 0,
        };
        if depth.saturating_add(existing_height) > MAX_TREE_DEPTH {
            return Err(CatalogError::DepthExceeded(MAX_TREE_DEPTH));
        }

        let (children, old_parent) = match store.lookup(&item.id) {
            Some(existing) => {
                summary.updated = summary.updated.saturating_add(1);
                (existing.children.clone(), existing.parent_id.clone())
            }
            None => {
                summary.created = summary.created.saturating_add(1);
                (BTreeSet::new(), None)
            }
        };

        if item.kind == NodeKind::Offer && !children.is_empty() {
            return Err(CatalogError::OfferHasChildren(item.id.clone()));
        }

        // Detach from the previous parent when moving.
        if let Some(old) = old_parent.filter(|old| item.parent_id.as_ref() != Some(old)) {
            journal.record(store, &old);
            if let Some(old_node) = store.lookup_mut(&old) {
                old_node.children.remove(&item.id);
            }
        }

        journal.record(store, &item.id);
        let mut node = Node::from_item(item, children, date);
        if node.kind == NodeKind::Category {
            node.price = None;
        }
        store.put(node);

        if let Some(parent) = &item.parent_id {
            journal.record(store, parent);
            if let Some(parent_node) = store.lookup_mut(parent) {
                parent_node.children.insert(item.id.clone());
            }
        }

        let bumped = Self::propagate_date(store, item.parent_id.clone(), date, journal)?;
        summary.touched_ancestors = summary.touched_ancestors.saturating_add(bumped);

        Ok(())
    }

    /// Walk `parent_id` links upward from `start`, stamping each ancestor.
    ///
    /// Returns the number of ancestors whose date changed.
    fn propagate_date<S: CatalogStore>(
        store: &mut S,
        start: Option<NodeId>,
        date: &str,
        journal: &mut Journal,
    ) -> Result<usize, CatalogError> {
        let mut visited = BTreeSet::new();
        let mut bumped = 0usize;
        let mut current = start;

        while let Some(id) = current {
            if !visited.insert(id.clone()) {
                return Err(CatalogError::CycleDetected(id));
            }

            journal.record(store, &id);
            let Some(node) = store.lookup_mut(&id) else {
                break;
            };
            if node.date != date {
                node.date = date.to_string();
                bumped = bumped.saturating_add(1);
            }
            current = node.parent_id.clone();
        }

        Ok(bumped)
    }

    /// Number of `parent_id` links between `id` and its root.
    fn depth_of<S: CatalogStore>(store: &S, id: &NodeId) -> usize {
        let mut visited = BTreeSet::new();
        let mut depth = 0usize;
        let mut current = store.lookup(id).and_then(|n| n.parent_id.as_ref());

        while let Some(cur) = current {
            if !visited.insert(cur) {
                break;
            }
            depth = depth.saturating_add(1);
            current = store.lookup(cur).and_then(|n| n.parent_id.as_ref());
        }

        depth
    }

    /// Longest chain of child links below `id`.
    fn subtree_height<S: CatalogStore>(store: &S, id: &NodeId) -> usize {
        let mut height = 0usize;
        let mut stack = vec![(id, 0usize)];

        while let Some((cur, level)) = stack.pop() {
            height = height.max(level);
            if let Some(node) = store.lookup(cur) {
                stack.extend(
                    node.children
                        .iter()
                        .map(|child| (child, level.saturating_add(1))),
                );
            }
        }

        height
    }

    /// Whether `id` is `from` or one of its ancestors.
    fn is_ancestor_or_self<S: CatalogStore>(store: &S, id: &NodeId, from: &NodeId) -> bool {
        let mut visited = BTreeSet::new();
        let mut current = Some(from);

        while let Some(cur) = current {
            if cur == id {
                return true;
            }
            if !visited.insert(cur) {
                return false;
            }
            current = store.lookup(cur).and_then(|n| n.parent_id.as_ref());
        }

        false
    }
}

// =============================================================================
// UNDO JOURNAL
// =============================================================================

/// First-touch snapshots of every entry a batch writes.
///
/// `None` means the entry did not exist before the batch.
#[derive(Debug, Default)]
struct Journal {
    before: BTreeMap<NodeId, Option<Node>>,
}

impl Journal {
    fn record<S: CatalogStore>(&mut self, store: &S, id: &NodeId) {
        if !self.before.contains_key(id) {
            self.before.insert(id.clone(), store.lookup(id).cloned());
        }
    }

    fn rollback<S: CatalogStore>(self, store: &mut S) {
        for (id, previous) in self.before {
            match previous {
                Some(node) => {
                    store.put(node);
                }
                None => {
                    store.take(&id);
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
