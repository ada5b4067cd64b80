//! Route definitions for the servant catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/catalog`.
///
/// ```text
/// GET    /classes                  -> list_classes
/// GET    /rarities                 -> list_rarities
/// GET    /servants/{collection_no} -> get_servant
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(catalog::list_classes))
        .route("/rarities", get(catalog::list_rarities))
        .route("/servants/{collection_no}", get(catalog::get_servant))
}
