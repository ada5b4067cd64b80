/// Errors from fetching or parsing a sheet export.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The data source has no spreadsheet id, so there is nothing to fetch.
    #[error("No spreadsheet id configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The export endpoint answered with a non-2xx status.
    #[error("Spreadsheet export returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}
