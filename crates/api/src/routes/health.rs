use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of servants in the loaded catalog.
    pub catalog_size: usize,
    /// Data sources with rows currently cached.
    pub cached_sources: usize,
}

/// GET /health -- liveness plus catalog and cache sizes.
///
/// An empty catalog is reported as `degraded`,
/// since class and rarity filters cannot match anything without it.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_size = state.catalog.len();
    let status = if catalog_size > 0 { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        catalog_size,
        cached_sources: state.rows.len().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
