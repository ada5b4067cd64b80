//! Handler reporting where the configured sheet load stands.

use axum::extract::{RawQuery, State};
use axum::response::IntoResponse;
use axum::Json;
use questreel_core::codec;
use questreel_sheets::{load, SourceState};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{params_from_raw, ListParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatusResponse {
    /// `disabled`, `pending`, `ready` or `failed`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SourceState> for SourceStatusResponse {
    fn from(state: &SourceState) -> Self {
        Self {
            status: state.as_str(),
            row_count: state.rows().map(|rows| rows.len()),
            error: match state {
                SourceState::Failed(msg) => Some(msg.clone()),
                _ => None,
            },
        }
    }
}

/// GET /api/v1/source?{settings query}
///
/// Answers from the cache when it can. Otherwise loads the sheet, so a
/// failure is reported as `failed` with a message rather than an error
/// status. A fetch already in flight reports `pending`.
pub async fn source_status(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> AppResult<impl IntoResponse> {
    let params = params_from_raw(raw.as_deref());
    let source = codec::decode(&params).settings.data_source;

    if ListParams::from_params(&params).refresh {
        state.rows.invalidate(&source).await;
    }

    let current = match state.rows.peek(&source).await {
        Some(known) => known,
        None => load(state.rows.as_ref(), &source).await,
    };

    Ok(Json(DataResponse {
        data: SourceStatusResponse::from(&current),
    }))
}
