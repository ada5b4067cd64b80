//! HTTP row source backed by the Google Sheets CSV export.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use questreel_core::settings::DataSource;

use crate::error::FetchError;
use crate::export::csv_export_url;
use crate::parse::{parse_csv, Rows};
use crate::source::RowSource;

/// Fetches sheet exports over HTTP.
pub struct HttpRowSource {
    client: reqwest::Client,
}

impl HttpRowSource {
    /// Build a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Reuse an existing client (shared connection pool).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RowSource for HttpRowSource {
    async fn fetch_rows(&self, source: &DataSource) -> Result<Arc<Rows>, FetchError> {
        let url = csv_export_url(source).ok_or(FetchError::NotConfigured)?;
        tracing::info!(url = %url, "Fetching sheet export");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let rows = parse_csv(&body)?;
        tracing::debug!(rows = rows.len(), "Parsed sheet export");
        Ok(Arc::new(rows))
    }
}
