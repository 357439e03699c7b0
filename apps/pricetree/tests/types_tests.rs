//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use pricetree::api::{
    EmptyResponse, ErrorResponse, HealthResponse, ImportItemRequest, ImportRequest,
    MessageResponse, SalesQuery, SalesResponse,
};
use pricetree_core::{CatalogError, NodeId, NodeKind, NodeStamp};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

// =============================================================================
// IMPORT REQUEST TESTS
// =============================================================================

#[test]
fn test_import_request_deserialization() {
    let json = r#"{
        "items": [
            {"id": "a", "name": "Root", "type": "CATEGORY", "parentId": null},
            {"id": "b", "name": "Item", "type": "OFFER", "parentId": "a", "price": 99}
        ],
        "updateDate": "2022-05-28T21:12:01.000Z"
    }"#;

    let request: ImportRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.items.len(), 2);
    assert_eq!(request.update_date, "2022-05-28T21:12:01.000Z");
    assert_eq!(request.items[1].parent_id.as_deref(), Some("a"));
    assert_eq!(request.items[1].price, Some(99));
}

#[test]
fn test_import_item_optional_fields_may_be_absent() {
    let json = r#"{"id": "a", "name": "Root", "type": "CATEGORY"}"#;
    let item: ImportItemRequest = serde_json::from_str(json).unwrap();

    assert_eq!(item.parent_id, None);
    assert_eq!(item.price, None);
}

#[test]
fn test_import_item_rejects_string_price() {
    let json = r#"{"id": "a", "name": "x", "type": "OFFER", "price": "10"}"#;
    assert!(serde_json::from_str::<ImportItemRequest>(json).is_err());
}

#[test]
fn test_import_request_rejects_missing_items() {
    let json = r#"{"updateDate": "2022-01-01"}"#;
    assert!(serde_json::from_str::<ImportRequest>(json).is_err());
}

#[test]
fn test_to_batch_converts_items() {
    let json = r#"{
        "items": [{"id": "b", "name": "Item", "type": "OFFER", "parentId": "a", "price": 7}],
        "updateDate": "2022-01-01"
    }"#;
    let request: ImportRequest = serde_json::from_str(json).unwrap();

    let batch = request.to_batch().unwrap();

    assert_eq!(batch.update_date, "2022-01-01");
    let item = &batch.items[0];
    assert_eq!(item.id, NodeId::from("b"));
    assert_eq!(item.kind, NodeKind::Offer);
    assert_eq!(item.parent_id, Some(NodeId::from("a")));
    assert_eq!(item.price, Some(7));
}

#[test]
fn test_to_batch_rejects_unknown_type() {
    let json = r#"{
        "items": [{"id": "a", "name": "x", "type": "offer"}],
        "updateDate": "2022-01-01"
    }"#;
    let request: ImportRequest = serde_json::from_str(json).unwrap();

    assert!(matches!(
        request.to_batch(),
        Err(CatalogError::MalformedItem(_))
    ));
}

// =============================================================================
// RESPONSE BODY TESTS
// =============================================================================

#[test]
fn test_empty_response_serialization() {
    let json = serde_json::to_string(&EmptyResponse::default()).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_message_response_deleted() {
    let json = serde_json::to_string(&MessageResponse::deleted()).unwrap();
    assert_eq!(json, r#"{"message":"all deleted"}"#);
}

#[test]
fn test_error_response_bodies() {
    let json = serde_json::to_string(&ErrorResponse::validation_failed()).unwrap();
    assert_eq!(json, r#"{"code":400,"message":"Validation Failed"}"#);

    let json = serde_json::to_string(&ErrorResponse::not_found()).unwrap();
    assert_eq!(json, r#"{"code":404,"message":"Item not found"}"#);
}

// =============================================================================
// SALES TESTS
// =============================================================================

#[test]
fn test_sales_query_date_optional() {
    let query: SalesQuery = serde_json::from_str("{}").unwrap();
    assert_eq!(query.date, None);
}

#[test]
fn test_sales_response_serialization() {
    let response = SalesResponse {
        items: vec![NodeStamp {
            id: NodeId::from("a"),
            date: "2022-01-01".to_string(),
        }],
    };

    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(json, r#"{"items":[{"id":"a","date":"2022-01-01"}]}"#);
}
