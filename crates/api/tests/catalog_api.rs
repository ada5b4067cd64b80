//! Integration tests for the catalog endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Test: class options cover all fifteen classes in display order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn class_options_in_display_order() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/catalog/classes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let options = json["data"].as_array().unwrap();
    assert_eq!(options.len(), 15);
    assert_eq!(options[0]["value"], "saber");
    assert_eq!(options[0]["label"], "剣");
    assert_eq!(options[0]["longLabel"], "セイバー");
    assert_eq!(options[14]["value"], "beast");
}

// ---------------------------------------------------------------------------
// Test: rarity options run from 0 to 5 without long labels
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rarity_options() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/catalog/rarities").await).await;
    let options = json["data"].as_array().unwrap();

    assert_eq!(options.len(), 6);
    assert_eq!(options[0]["value"], "0");
    assert_eq!(options[5]["label"], "★5");
    assert!(options[5].get("longLabel").is_none());
}

// ---------------------------------------------------------------------------
// Test: servant lookup by collection number
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_servant_by_collection_no() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/catalog/servants/2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["collectionNo"], 2);
    assert_eq!(json["data"]["className"], "saber");
    assert_eq!(json["data"]["rarity"], 5);
}

#[tokio::test]
async fn unknown_servant_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/catalog/servants/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Servant with id 9999 not found");
}
