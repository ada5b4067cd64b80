//! Handlers for settings: query decoding, form validation, encoding and
//! spreadsheet URL parsing.

use axum::extract::RawQuery;
use axum::response::IntoResponse;
use axum::Json;
use questreel_core::codec::{self, QueryParams};
use questreel_core::draft::{validate_settings, SettingsDraft};
use questreel_core::sort::{sort_options, SortOption};
use questreel_core::spreadsheet::{parse_spreadsheet_url, ParsedSpreadsheetUrl};
use questreel_core::SourceSettings;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::params_from_raw;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSettingsResponse {
    pub settings: SourceSettings,
    pub has_invalid_values: bool,
    /// Canonical query string for these settings. Callers replace the page
    /// URL with it when `has_invalid_values` is set.
    pub canonical_query: String,
    /// The settings as form values, for pre-filling the settings dialog.
    pub draft: SettingsDraft,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedSettingsResponse {
    pub settings: SourceSettings,
    pub query: String,
    pub params: QueryParams,
}

impl EncodedSettingsResponse {
    fn new(settings: SourceSettings) -> Self {
        let params = codec::encode(&settings);
        Self {
            query: codec::to_query_string(&params),
            params,
            settings,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ParseUrlRequest {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/settings?{settings query}
///
/// Decode settings from the query string. Never fails; invalid values fall
/// back to defaults and raise `hasInvalidValues`.
pub async fn get_settings(RawQuery(raw): RawQuery) -> AppResult<impl IntoResponse> {
    let params = codec::settings_params(&params_from_raw(raw.as_deref()));
    let decoded = codec::decode(&params);
    if decoded.has_invalid_values {
        tracing::info!("Settings query contained invalid values, returning healed query");
    }

    let canonical_query = codec::to_query_string(&codec::encode(&decoded.settings));
    let draft = SettingsDraft::from_settings(&decoded.settings);

    Ok(Json(DataResponse {
        data: DecodedSettingsResponse {
            settings: decoded.settings,
            has_invalid_values: decoded.has_invalid_values,
            canonical_query,
            draft,
        },
    }))
}

/// POST /api/v1/settings
///
/// Validate the settings form. Returns 422 with per-field messages on
/// failure, otherwise the committed settings and their query string.
pub async fn submit_settings(Json(draft): Json<SettingsDraft>) -> AppResult<impl IntoResponse> {
    let settings = draft.validate()?;
    Ok(Json(DataResponse {
        data: EncodedSettingsResponse::new(settings),
    }))
}

/// POST /api/v1/settings/encode
///
/// Same field checks as the form; an empty id, gid or fixed quest name is
/// treated as unset.
pub async fn encode_settings(
    Json(settings): Json<SourceSettings>,
) -> AppResult<impl IntoResponse> {
    let settings = validate_settings(&settings)?;
    Ok(Json(DataResponse {
        data: EncodedSettingsResponse::new(settings),
    }))
}

/// POST /api/v1/settings/parse-url
///
/// Extract type, id and gid from a pasted spreadsheet URL. 400 when the
/// URL matches neither known shape.
pub async fn parse_url(Json(body): Json<ParseUrlRequest>) -> AppResult<impl IntoResponse> {
    let parsed: ParsedSpreadsheetUrl = parse_spreadsheet_url(&body.url);
    if !parsed.is_recognized() {
        return Err(AppError::BadRequest(
            "Spreadsheet URL format not recognized".into(),
        ));
    }
    Ok(Json(DataResponse { data: parsed }))
}

/// GET /api/v1/sort-options?{settings query}
///
/// Sort keys offered for the mapping modes in effect.
pub async fn list_sort_options(RawQuery(raw): RawQuery) -> AppResult<impl IntoResponse> {
    let params = params_from_raw(raw.as_deref());
    let settings = codec::decode(&params).settings;
    let options: Vec<SortOption> = sort_options(&settings);
    Ok(Json(DataResponse { data: options }))
}
