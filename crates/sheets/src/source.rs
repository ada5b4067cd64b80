//! The row source abstraction and the states a sheet load can end in.

use std::sync::Arc;

use async_trait::async_trait;
use questreel_core::settings::DataSource;

use crate::error::FetchError;
use crate::parse::Rows;

/// Anything that can produce raw rows for a data source.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self, source: &DataSource) -> Result<Arc<Rows>, FetchError>;
}

/// Where a sheet load stands. `Disabled` and `Failed` are terminal; nothing
/// retries on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState {
    /// No spreadsheet id configured; no fetch attempted.
    Disabled,
    /// A fetch for this source is in flight.
    Pending,
    Ready(Arc<Rows>),
    /// The fetch or parse failed; carries a message for display.
    Failed(String),
}

impl SourceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Pending => "pending",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }

    pub fn rows(&self) -> Option<&Arc<Rows>> {
        match self {
            Self::Ready(rows) => Some(rows),
            _ => None,
        }
    }
}

/// Load a data source through `rows`, folding every outcome into a state.
pub async fn load(rows: &dyn RowSource, source: &DataSource) -> SourceState {
    if !source.is_configured() {
        return SourceState::Disabled;
    }
    match rows.fetch_rows(source).await {
        Ok(rows) => SourceState::Ready(rows),
        Err(FetchError::NotConfigured) => SourceState::Disabled,
        Err(e) => {
            tracing::warn!(error = %e, "Sheet fetch failed");
            SourceState::Failed(e.to_string())
        }
    }
}
