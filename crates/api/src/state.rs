use std::sync::Arc;

use questreel_core::ServantCatalog;
use questreel_sheets::CachedRowSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Read-only servant reference table.
    pub catalog: Arc<ServantCatalog>,
    /// Cached spreadsheet row source.
    pub rows: Arc<CachedRowSource>,
}
