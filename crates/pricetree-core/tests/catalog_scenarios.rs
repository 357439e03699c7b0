//! # Catalog Scenario Tests
//!
//! End-to-end behaviour of the catalog through its public API.
//!
//! ## Groups
//! - Import: date propagation and replace semantics
//! - Delete: cascade and parent detachment
//! - Read: aggregated subtree prices

use pricetree_core::{Catalog, CatalogError, ImportBatch, ImportItem, NodeId, NodeKind};

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

/// Root category imported on day one, a book offer under it on day two.
fn book_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .import_batch(&ImportBatch::new(
            vec![ImportItem::category("1", "Root", None)],
            "2022-01-01",
        ))
        .expect("root");
    catalog
        .import_batch(&ImportBatch::new(
            vec![ImportItem::offer("2", "Book", Some("1"), 300)],
            "2022-01-02",
        ))
        .expect("book");
    catalog
}

// =============================================================================
// IMPORT
// =============================================================================

mod import {
    use super::*;

    #[test]
    fn offer_import_bumps_root_date_and_price() {
        let catalog = book_catalog();

        let view = catalog.subtree(&id("1")).expect("subtree");

        assert_eq!(view.price, 300);
        assert_eq!(view.date, "2022-01-02");
        assert_eq!(catalog.get(&id("1")).expect("root").date, "2022-01-02");
    }

    #[test]
    fn every_item_and_ancestor_carries_batch_date() {
        let mut catalog = book_catalog();
        catalog
            .import_batch(&ImportBatch::new(
                vec![
                    ImportItem::category("3", "Shelf", Some("1")),
                    ImportItem::offer("4", "Novel", Some("3"), 50),
                ],
                "2022-01-03",
            ))
            .expect("import");

        let stamps = catalog.stamps();
        for stamp in &stamps {
            let expected = if stamp.id == id("2") {
                "2022-01-02"
            } else {
                "2022-01-03"
            };
            assert_eq!(stamp.date, expected, "node {}", stamp.id);
        }
        assert_eq!(stamps.len(), 4);
    }

    #[test]
    fn full_replace_overwrites_scalars_but_keeps_children() {
        let mut catalog = book_catalog();
        catalog
            .import_batch(&ImportBatch::new(
                vec![ImportItem::category("9", "Other root", None)],
                "2022-01-03",
            ))
            .expect("other root");

        catalog
            .import_batch(&ImportBatch::new(
                vec![ImportItem::category("1", "Renamed root", Some("9"))],
                "2022-01-04",
            ))
            .expect("replace");

        let root = catalog.get(&id("1")).expect("root");
        assert_eq!(root.name, "Renamed root");
        assert_eq!(root.kind, NodeKind::Category);
        assert_eq!(root.parent_id, Some(id("9")));
        assert!(root.children.contains(&id("2")));
        assert_eq!(catalog.subtree(&id("9")).expect("subtree").price, 300);
    }

    #[test]
    fn offer_price_replace_changes_aggregate() {
        let mut catalog = book_catalog();
        catalog
            .import_batch(&ImportBatch::new(
                vec![ImportItem::offer("2", "Book", Some("1"), 500)],
                "2022-01-05",
            ))
            .expect("reprice");

        assert_eq!(catalog.subtree(&id("1")).expect("subtree").price, 500);
    }

    #[test]
    fn unknown_parent_leaves_catalog_untouched() {
        let mut catalog = book_catalog();
        let before = catalog.clone();

        let result = catalog.import_batch(&ImportBatch::new(
            vec![
                ImportItem::offer("5", "Pen", Some("1"), 10),
                ImportItem::offer("6", "Cap", Some("404"), 10),
            ],
            "2022-01-06",
        ));

        assert!(matches!(result, Err(CatalogError::UnknownParent { .. })));
        assert_eq!(catalog, before);
    }
}

// =============================================================================
// DELETE
// =============================================================================

mod delete {
    use super::*;

    #[test]
    fn deleting_root_removes_subtree() {
        let mut catalog = book_catalog();

        catalog.delete(&id("1")).expect("delete");

        assert_eq!(
            catalog.subtree(&id("1")),
            Err(CatalogError::NotFound(id("1")))
        );
        assert_eq!(
            catalog.subtree(&id("2")),
            Err(CatalogError::NotFound(id("2")))
        );
        assert!(catalog.stamps().is_empty());
    }

    #[test]
    fn deleting_leaf_updates_parent_aggregate() {
        let mut catalog = book_catalog();
        catalog
            .import_batch(&ImportBatch::new(
                vec![ImportItem::offer("3", "Map", Some("1"), 100)],
                "2022-01-03",
            ))
            .expect("map");
        assert_eq!(catalog.subtree(&id("1")).expect("subtree").price, 200);

        catalog.delete(&id("2")).expect("delete");

        let view = catalog.subtree(&id("1")).expect("subtree");
        assert_eq!(view.price, 100);
        assert!(!catalog.get(&id("1")).expect("root").children.contains(&id("2")));
    }

    #[test]
    fn deleting_twice_is_not_found() {
        let mut catalog = book_catalog();

        catalog.delete(&id("2")).expect("first");
        assert_eq!(
            catalog.delete(&id("2")),
            Err(CatalogError::NotFound(id("2")))
        );
    }
}

// =============================================================================
// READ
// =============================================================================

mod read {
    use super::*;

    #[test]
    fn view_json_matches_wire_contract() {
        let catalog = book_catalog();

        let json = serde_json::to_value(catalog.subtree(&id("1")).expect("subtree"))
            .expect("serialize");

        assert_eq!(json["id"], "1");
        assert_eq!(json["type"], "CATEGORY");
        assert!(json["parentId"].is_null());
        assert_eq!(json["price"], 300);
        assert_eq!(json["children"][0]["id"], "2");
        assert!(json["children"][0]["children"].is_null());
    }

    #[test]
    fn read_does_not_mutate_catalog() {
        let catalog = book_catalog();
        let before = catalog.clone();

        let _ = catalog.subtree(&id("1")).expect("subtree");

        assert_eq!(catalog, before);
        assert_eq!(catalog.get(&id("1")).expect("root").price, None);
    }
}
