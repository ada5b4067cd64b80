//! Row source for QuestReel: fetches a Google Sheets CSV export and turns
//! it into raw rows for the core mapper.
//!
//! - [`export::csv_export_url`] builds the export URL for a data source.
//! - [`HttpRowSource`] fetches and parses it.
//! - [`CachedRowSource`] adds a TTL cache and stale-fetch discarding.
//! - [`source::load`] folds a fetch into a [`SourceState`].

pub mod cache;
pub mod client;
pub mod error;
pub mod export;
pub mod parse;
pub mod source;
pub mod tracker;

pub use cache::CachedRowSource;
pub use client::HttpRowSource;
pub use error::FetchError;
pub use parse::Rows;
pub use source::{load, RowSource, SourceState};
pub use tracker::{FetchTicket, FetchTracker};
