pub mod catalog;
pub mod health;
pub mod settings;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /settings                                        decode (GET), validate draft (POST)
/// /settings/encode                                 settings JSON -> query (POST)
/// /settings/parse-url                              spreadsheet URL -> type, id, gid (POST)
///
/// /sort-options                                    sort keys for the mapping (GET)
///
/// /catalog/classes                                 class selector options
/// /catalog/rarities                                rarity selector options
/// /catalog/servants/{collection_no}                single catalog entry
///
/// /source                                          sheet load status (GET)
/// /records                                         filtered, sorted page of cards (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/settings", settings::router())
        .nest("/catalog", catalog::router())
        .route(
            "/sort-options",
            get(handlers::settings::list_sort_options),
        )
        .route("/source", get(handlers::source::source_status))
        .route("/records", get(handlers::records::list_records))
}
