//! Handler for the record listing: fetch, map, filter, sort and paginate.

use axum::extract::{RawQuery, State};
use axum::response::IntoResponse;
use axum::Json;
use questreel_core::codec;
use questreel_core::filter::apply_filters;
use questreel_core::mapper::map_rows;
use questreel_core::pagination::{paginate, Page};
use questreel_core::sort::{available_sort_keys, sort_records, SortKey};
use questreel_core::ResultRecord;
use questreel_sheets::{RowSource, SourceState};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{params_from_raw, ListParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListResponse {
    /// `ready`, or `disabled` when no spreadsheet is configured.
    pub status: &'static str,
    /// The sort key actually applied.
    pub sort: SortKey,
    #[serde(flatten)]
    pub page: Page<ResultRecord>,
    /// Present only when the settings query needed repair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_query: Option<String>,
}

/// GET /api/v1/records?{settings query}&{filter, sort and page params}
///
/// A sort key the current mapping does not offer falls back to source
/// order. Upstream failures surface as 502.
pub async fn list_records(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> AppResult<impl IntoResponse> {
    let params = params_from_raw(raw.as_deref());
    let settings = codec::decode(&params).settings;
    let list = ListParams::from_params(&params);
    let canonical_query = codec::heal(&params);

    let sort = if available_sort_keys(&settings).contains(&list.sort) {
        list.sort
    } else {
        SortKey::Default
    };

    let source = &settings.data_source;
    if !source.is_configured() {
        return Ok(Json(DataResponse {
            data: RecordListResponse {
                status: SourceState::Disabled.as_str(),
                sort,
                page: paginate::<ResultRecord>(&[], 1, list.per_page),
                canonical_query,
            },
        }));
    }

    if list.refresh {
        state.rows.invalidate(source).await;
    }
    let rows = state.rows.fetch_rows(source).await?;

    let records = map_rows(&rows, &settings, &state.catalog);
    let filtered = apply_filters(&records, &list.criteria, &settings, &state.catalog);
    let sorted = sort_records(&filtered, sort, list.order, &state.catalog);
    tracing::debug!(
        rows = rows.len(),
        records = records.len(),
        matched = sorted.len(),
        "Built record list"
    );

    Ok(Json(DataResponse {
        data: RecordListResponse {
            status: SourceState::Ready(rows).as_str(),
            sort,
            page: paginate(&sorted, list.page, list.per_page),
            canonical_query,
        },
    }))
}
