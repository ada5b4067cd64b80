use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use questreel_core::catalog::{ServantCatalog, ServantClass, ServantEntry};
use questreel_core::settings::DataSource;
use questreel_sheets::{CachedRowSource, FetchError, RowSource, Rows};
use tower::ServiceExt;

use questreel_api::config::ServerConfig;
use questreel_api::router::build_app_router;
use questreel_api::state::AppState;

/// Spreadsheet id served by [`StaticRowSource`]. Any other id answers 404.
pub const SHEET_ID: &str = "sheet1";

/// In-memory row source standing in for the Google Sheets export.
pub struct StaticRowSource {
    rows: Arc<Rows>,
}

#[async_trait]
impl RowSource for StaticRowSource {
    async fn fetch_rows(&self, source: &DataSource) -> Result<Arc<Rows>, FetchError> {
        match source.id.as_deref() {
            None => Err(FetchError::NotConfigured),
            Some(SHEET_ID) => Ok(Arc::clone(&self.rows)),
            Some(other) => Err(FetchError::Status {
                status: 404,
                url: format!("https://docs.google.com/spreadsheets/d/{other}/export"),
            }),
        }
    }
}

/// Columns: quest, turn, collection no, video URL(s), date, note.
///
/// Yields four records: one per URL line, minus the unrecognized link.
pub fn sample_rows() -> Rows {
    let row = |cells: [&str; 6]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    vec![
        row([
            "高難易度",
            "3T",
            "2",
            "https://youtu.be/dQw4w9WgXcQ",
            "2025/1/5",
            "solo",
        ]),
        row([
            "フリークエスト",
            "1",
            "1",
            "https://www.youtube.com/watch?v=abcdefghijk\nhttps://x.com/user/status/12345",
            "2024/12/31",
            "",
        ]),
        row([
            "高難易度",
            "",
            "11",
            "https://www.bilibili.com/video/BV1xx411c7mD",
            "",
            "no CE",
        ]),
        row([
            "高難易度",
            "2",
            "999",
            "https://example.com/not-a-video",
            "",
            "",
        ]),
    ]
}

pub fn sample_catalog() -> ServantCatalog {
    let entry = |no: u32, name: &str, class_name, rarity| ServantEntry {
        collection_no: no,
        name: name.to_string(),
        class_name,
        rarity,
    };
    ServantCatalog::from_entries([
        entry(1, "マシュ・キリエライト", ServantClass::Shielder, 4),
        entry(2, "アルトリア・ペンドラゴン", ServantClass::Saber, 5),
        entry(11, "エミヤ", ServantClass::Archer, 4),
    ])
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        catalog_path: "data/servant_data.json".into(),
        sheet_cache_ttl_secs: 300,
        fetch_timeout_secs: 15,
    }
}

/// Build the full application router over [`sample_rows`] and
/// [`sample_catalog`], with the same middleware stack production uses.
pub fn build_test_app() -> Router {
    build_test_app_with(sample_rows(), sample_catalog())
}

pub fn build_test_app_with(rows: Rows, catalog: ServantCatalog) -> Router {
    let config = test_config();
    let upstream = StaticRowSource {
        rows: Arc::new(rows),
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        rows: Arc::new(CachedRowSource::new(
            Arc::new(upstream),
            Duration::from_secs(config.sheet_cache_ttl_secs),
        )),
    };

    build_app_router(state, &config)
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body through the router.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
