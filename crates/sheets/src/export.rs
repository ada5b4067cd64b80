//! Google Sheets CSV export URLs.

use questreel_core::settings::{DataSource, SourceType};

const SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// CSV export URL for a data source, or `None` when no spreadsheet id is
/// configured.
///
/// Published sheets (`public`) are read through `/d/e/{id}/pub`, shared
/// sheets through `/d/{id}/export`. The gid, when present, selects the tab.
pub fn csv_export_url(source: &DataSource) -> Option<String> {
    let id = source.id.as_deref()?;
    let gid = source
        .gid
        .as_deref()
        .map(|g| format!("&gid={g}"))
        .unwrap_or_default();

    Some(match source.source_type {
        SourceType::Public => format!("{SHEETS_BASE}/e/{id}/pub?output=csv{gid}"),
        SourceType::Shared => format!("{SHEETS_BASE}/{id}/export?format=csv{gid}"),
    })
}
