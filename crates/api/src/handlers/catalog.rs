//! Handlers for the servant catalog: selector options and single lookups.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use questreel_core::catalog::{class_options, rarity_options};
use questreel_core::error::CoreError;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/classes
pub async fn list_classes() -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: class_options(),
    }))
}

/// GET /api/v1/catalog/rarities
pub async fn list_rarities() -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: rarity_options(),
    }))
}

/// GET /api/v1/catalog/servants/{collection_no}
pub async fn get_servant(
    State(state): State<AppState>,
    Path(collection_no): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .catalog
        .get(&collection_no)
        .cloned()
        .ok_or(CoreError::NotFound {
            entity: "Servant",
            id: collection_no,
        })?;
    Ok(Json(DataResponse { data: entry }))
}
