//! QuestReel core: spreadsheet rows to filterable video cards.
//!
//! Everything here is synchronous and free of I/O (apart from
//! [`catalog::ServantCatalog::from_path`]). The pipeline is plain function
//! composition driven by an explicitly passed [`settings::SourceSettings`]:
//!
//! - [`codec`] decodes the settings from a query string and re-encodes them.
//! - [`mapper::map_rows`] turns raw rows into [`mapper::ResultRecord`]s.
//! - [`filter::apply_filters`] and [`sort::sort_records`] shape the view.
//! - [`pagination::paginate`] slices it.

pub mod catalog;
pub mod codec;
pub mod date;
pub mod draft;
pub mod error;
pub mod filter;
pub mod mapper;
pub mod pagination;
pub mod settings;
pub mod sort;
pub mod spreadsheet;
pub mod video;

pub use catalog::ServantCatalog;
pub use error::CoreError;
pub use mapper::ResultRecord;
pub use settings::SourceSettings;
