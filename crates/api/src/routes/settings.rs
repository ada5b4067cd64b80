//! Route definitions for settings decoding, validation and encoding.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes mounted at `/settings`.
///
/// ```text
/// GET    /                  -> get_settings
/// POST   /                  -> submit_settings
/// POST   /encode            -> encode_settings
/// POST   /parse-url         -> parse_url
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::get_settings).post(settings::submit_settings))
        .route("/encode", post(settings::encode_settings))
        .route("/parse-url", post(settings::parse_url))
}
