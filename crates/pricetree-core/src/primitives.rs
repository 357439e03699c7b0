//! # Catalog Primitives
//!
//! Hardcoded limits for the pricetree core.
//!
//! These are compiled into the binary and immutable at runtime.
//! Every operation on the catalog is bounded by one of them.

/// Maximum number of `parent_id` links between any node and its root.
///
/// The importer rejects an item that would place a node deeper than this
/// with `CatalogError::DepthExceeded`, so every stored subtree can be
/// materialized within the same bound.
pub const MAX_TREE_DEPTH: usize = 128;

/// Maximum number of items in a single import batch.
pub const MAX_BATCH_SIZE: usize = 10000;

/// Maximum length of a node id in bytes.
pub const MAX_ID_LENGTH: usize = 256;

/// Maximum length of a node name in bytes.
pub const MAX_NAME_LENGTH: usize = 1024;

/// Maximum length of an update date string in bytes.
pub const MAX_DATE_LENGTH: usize = 64;
