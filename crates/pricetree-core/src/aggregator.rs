//! # Aggregator Module
//!
//! Read-side assembly for the pricetree core.
//!
//! - Materialize a subtree into an owned `TreeView`
//! - Derive category prices from every offer beneath them
//! - Integer arithmetic only; ties round half to even

use crate::catalog::CatalogStore;
use crate::primitives::MAX_TREE_DEPTH;
use crate::{CatalogError, NodeId, NodeKind, TreeView};

/// Running `(sum, count)` of offer prices under a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceTotals {
    pub sum: i128,
    pub count: u64,
}

impl PriceTotals {
    /// Totals contributed by a single offer.
    #[must_use]
    pub fn single(price: i64) -> Self {
        Self {
            sum: i128::from(price),
            count: 1,
        }
    }

    /// Combine two totals.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum.saturating_add(other.sum),
            count: self.count.saturating_add(other.count),
        }
    }

    /// Mean price rounded half to even, or `0` when there are no offers.
    ///
    /// `(1 + 2) / 2` rounds to `2`, `(2 + 3) / 2` rounds to `2`.
    #[must_use]
    pub fn rounded_mean(self) -> i64 {
        if self.count == 0 {
            return 0;
        }

        let count = i128::from(self.count);
        let quotient = self.sum.div_euclid(count);
        let twice_remainder = self.sum.rem_euclid(count).saturating_mul(2);

        let rounded = match twice_remainder.cmp(&count) {
            std::cmp::Ordering::Less => quotient,
            std::cmp::Ordering::Greater => quotient.saturating_add(1),
            std::cmp::Ordering::Equal if quotient.rem_euclid(2) == 0 => quotient,
            std::cmp::Ordering::Equal => quotient.saturating_add(1),
        };

        i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
    }
}

/// The Aggregator builds priced subtree views from a catalog store.
pub struct Aggregator;

impl Aggregator {
    /// Materialize and price the subtree rooted at `id`.
    pub fn subtree<S: CatalogStore>(store: &S, id: &NodeId) -> Result<TreeView, CatalogError> {
        let mut view = Self::materialize(store, id)?;
        Self::compute_prices(&mut view);
        Ok(view)
    }

    /// Deep-copy the subtree rooted at `id`.
    ///
    /// Category prices are left at `0` until `compute_prices` runs.
    /// Children are ordered by id.
    pub fn materialize<S: CatalogStore>(store: &S, id: &NodeId) -> Result<TreeView, CatalogError> {
        Self::materialize_at(store, id, 0)
    }

    fn materialize_at<S: CatalogStore>(
        store: &S,
        id: &NodeId,
        depth: usize,
    ) -> Result<TreeView, CatalogError> {
        if depth > MAX_TREE_DEPTH {
            return Err(CatalogError::DepthExceeded(MAX_TREE_DEPTH));
        }

        let node = store
            .lookup(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        let kids = node
            .children
            .iter()
            .map(|child| Self::materialize_at(store, child, depth.saturating_add(1)))
            .collect::<Result<Vec<_>, _>>()?;

        let children = if kids.is_empty() && node.kind == NodeKind::Offer {
            None
        } else {
            Some(kids)
        };

        let price = match node.kind {
            NodeKind::Offer => node.price.unwrap_or(0),
            NodeKind::Category => 0,
        };

        Ok(TreeView {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            parent_id: node.parent_id.clone(),
            price,
            date: node.date.clone(),
            children,
        })
    }

    /// Fill in category prices bottom-up and return the subtree totals.
    ///
    /// A category's totals are the raw totals of all offers beneath it; it
    /// never contributes a price of its own.
    pub fn compute_prices(view: &mut TreeView) -> PriceTotals {
        match view.kind {
            NodeKind::Offer => PriceTotals::single(view.price),
            NodeKind::Category => {
                let totals = view
                    .children
                    .iter_mut()
                    .flatten()
                    .map(Self::compute_prices)
                    .fold(PriceTotals::default(), PriceTotals::merge);
                view.price = totals.rounded_mean();
                totals
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
