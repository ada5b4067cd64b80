//! Integration tests for the record listing and source status endpoints.
//!
//! The sample sheet (see `common::sample_rows`) yields four records:
//!
//! | id         | platform | no. | turns | date       |
//! |------------|----------|-----|-------|------------|
//! | sheet1-0-0 | youtube  | 2   | 3     | 2025/01/05 |
//! | sheet1-1-0 | youtube  | 1   | 1     | 2024/12/31 |
//! | sheet1-1-1 | twitter  | 1   | 1     | 2024/12/31 |
//! | sheet1-2-0 | bilibili | 11  | -     | -          |

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

fn ids(json: &serde_json::Value) -> Vec<String> {
    json["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

async fn list(query: &str) -> serde_json::Value {
    let app = common::build_test_app();
    let response = get(app, &format!("/api/v1/records?ssId=sheet1{query}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Test: every row fans out into one record per recognized URL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_all_records_in_source_order() {
    let json = list("").await;
    let data = &json["data"];

    assert_eq!(data["status"], "ready");
    assert_eq!(data["sort"], "default");
    assert_eq!(data["totalItems"], 4);
    assert_eq!(data["totalPages"], 1);
    assert_eq!(data["page"], 1);
    assert_eq!(data["perPage"], 20);
    assert!(data.get("canonicalQuery").is_none());
    assert_eq!(
        ids(&json),
        vec!["sheet1-0-0", "sheet1-1-0", "sheet1-1-1", "sheet1-2-0"]
    );

    let first = &data["items"][0];
    assert_eq!(first["videoType"], "youtube");
    assert_eq!(first["videoId"], "dQw4w9WgXcQ");
    assert_eq!(first["collectionNo"], "2");
    assert_eq!(first["servantName"], "アルトリア・ペンドラゴン");
    assert_eq!(first["turnCount"], 3);
    assert_eq!(first["questName"], "高難易度");

    assert_eq!(data["items"][2]["videoType"], "twitter");
    assert_eq!(data["items"][2]["videoId"], "12345");
    assert!(data["items"][3]["turnCount"].is_null());
}

// ---------------------------------------------------------------------------
// Test: filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn class_filter_uses_catalog() {
    let json = list("&classes=archer").await;
    assert_eq!(ids(&json), vec!["sheet1-2-0"]);
}

#[tokio::test]
async fn rarity_filter_lets_mash_through() {
    let json = list("&rarities=5").await;
    assert_eq!(ids(&json), vec!["sheet1-0-0", "sheet1-1-0", "sheet1-1-1"]);
}

#[tokio::test]
async fn turn_bound_excludes_missing_counts() {
    let json = list("&minTurn=2").await;
    assert_eq!(ids(&json), vec!["sheet1-0-0"]);
}

#[tokio::test]
async fn quest_substring_filter() {
    // フリー
    let json = list("&quest=%E3%83%95%E3%83%AA%E3%83%BC").await;
    assert_eq!(ids(&json), vec!["sheet1-1-0", "sheet1-1-1"]);
}

#[tokio::test]
async fn note_filter_over_configured_note_column() {
    // notes=[{"col":5}]
    let json = list("&notes=%5B%7B%22col%22%3A5%7D%5D&note=CE").await;
    assert_eq!(ids(&json), vec!["sheet1-2-0"]);
    assert_eq!(json["data"]["items"][0]["note"], "no CE");
}

#[tokio::test]
async fn unparseable_filters_are_ignored() {
    let json = list("&minTurn=abc&rarities=9&classes=unknown").await;
    assert_eq!(json["data"]["totalItems"], 4);
}

// ---------------------------------------------------------------------------
// Test: sorting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn turn_sort_puts_missing_counts_last() {
    let json = list("&sort=turnCount&order=asc").await;
    assert_eq!(
        ids(&json),
        vec!["sheet1-1-0", "sheet1-1-1", "sheet1-0-0", "sheet1-2-0"]
    );

    let json = list("&sort=turnCount&order=desc").await;
    assert_eq!(
        ids(&json),
        vec!["sheet1-0-0", "sheet1-1-0", "sheet1-1-1", "sheet1-2-0"]
    );
}

#[tokio::test]
async fn date_sort_when_date_column_configured() {
    let json = list("&dateIdx=4&sort=date").await;
    assert_eq!(json["data"]["sort"], "date");
    assert_eq!(
        ids(&json),
        vec!["sheet1-1-0", "sheet1-1-1", "sheet1-0-0", "sheet1-2-0"]
    );
    assert_eq!(json["data"]["items"][2]["date"], "2025/01/05");
}

#[tokio::test]
async fn default_desc_reverses_source_order() {
    let json = list("&order=desc").await;
    assert_eq!(
        ids(&json),
        vec!["sheet1-2-0", "sheet1-1-1", "sheet1-1-0", "sheet1-0-0"]
    );
}

#[tokio::test]
async fn unavailable_sort_key_falls_back_to_default() {
    // servantName is only offered in name mode.
    let json = list("&sort=servantName").await;
    assert_eq!(json["data"]["sort"], "default");
    assert_eq!(
        ids(&json),
        vec!["sheet1-0-0", "sheet1-1-0", "sheet1-1-1", "sheet1-2-0"]
    );
}

// ---------------------------------------------------------------------------
// Test: pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pages_through_large_sheet() {
    let rows = (0..25)
        .map(|i| {
            vec![
                String::new(),
                String::new(),
                String::new(),
                format!("https://youtu.be/vid{i:08}"),
            ]
        })
        .collect();
    let app = common::build_test_app_with(rows, common::sample_catalog());

    let response = get(app, "/api/v1/records?ssId=sheet1&perPage=10&page=3").await;
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["totalItems"], 25);
    assert_eq!(data["totalPages"], 3);
    assert_eq!(data["page"], 3);
    assert_eq!(data["items"].as_array().unwrap().len(), 5);
    assert_eq!(data["items"][0]["videoId"], "vid00000020");
}

#[tokio::test]
async fn out_of_range_page_is_clamped() {
    let json = list("&page=9&perPage=7").await;
    assert_eq!(json["data"]["page"], 1);
    assert_eq!(json["data"]["perPage"], 20);
}

// ---------------------------------------------------------------------------
// Test: unconfigured, failing and healed sources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_spreadsheet_id_is_disabled() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/records").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "disabled");
    assert_eq!(json["data"]["totalItems"], 0);
    assert_eq!(json["data"]["totalPages"], 0);
    assert!(json["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failure_returns_502() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/records?ssId=missing").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FETCH_FAILED");
}

#[tokio::test]
async fn invalid_settings_return_canonical_query() {
    let json = list("&urlIdx=x").await;
    let canonical = json["data"]["canonicalQuery"].as_str().unwrap();
    assert!(canonical.contains("urlIdx=3"));
    assert!(canonical.contains("ssId=sheet1"));
    assert_eq!(json["data"]["totalItems"], 4);
}

#[tokio::test]
async fn refresh_refetches_and_still_lists() {
    let json = list("&refresh=true").await;
    assert_eq!(json["data"]["status"], "ready");
    assert_eq!(json["data"]["totalItems"], 4);
}

// ---------------------------------------------------------------------------
// Test: GET /source reports the load state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn source_status_for_each_outcome() {
    let app = common::build_test_app();

    let json = body_json(get(app.clone(), "/api/v1/source").await).await;
    assert_eq!(json["data"]["status"], "disabled");

    let json = body_json(get(app.clone(), "/api/v1/source?ssId=sheet1").await).await;
    assert_eq!(json["data"]["status"], "ready");
    assert_eq!(json["data"]["rowCount"], 4);

    let response = get(app, "/api/v1/source?ssId=missing").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "failed");
    assert!(json["data"]["error"].as_str().unwrap().contains("404"));
}

// ---------------------------------------------------------------------------
// Test: a listing warms the cache reported by /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_populates_cache() {
    let app = common::build_test_app();
    get(app.clone(), "/api/v1/records?ssId=sheet1").await;

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["cached_sources"], 1);
}
