//! Row mapper: raw spreadsheet rows to typed [`ResultRecord`]s.
//!
//! Nothing here fails. Unresolvable fields become `None`, rows without a
//! URL cell are skipped, and URL candidates that do not classify as a known
//! video platform are dropped one by one.

use serde::{Deserialize, Serialize};

use crate::catalog::ServantCatalog;
use crate::date::normalize_date;
use crate::settings::{
    ColumnIndex, NoteColumn, QuestNameMapping, ServantIdentify, SourceSettings, TurnMapping,
};
use crate::video::{classify_video_url, VideoLink, VideoPlatform};

/// Separator between multiple URLs in one cell and between joined notes.
const LINE_SEPARATOR: char = '\n';

/// One video card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// `{spreadsheet id}-{row}-{candidate}`; unique within one source.
    pub id: String,
    pub video_id: String,
    pub video_type: VideoPlatform,
    pub collection_no: Option<String>,
    pub servant_name: Option<String>,
    pub turn_count: Option<u32>,
    pub note: Option<String>,
    pub quest_name: Option<String>,
    /// Canonical `YYYY/MM/DD`.
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Map every row to zero or more records.
pub fn map_rows(
    rows: &[Vec<String>],
    settings: &SourceSettings,
    catalog: &ServantCatalog,
) -> Vec<ResultRecord> {
    let source_id = settings.data_source.id.as_deref().unwrap_or("null");
    let mut records = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let Some(url_cell) = cell(row, settings.mapping.url_col) else {
            continue;
        };

        let fields = RowFields::resolve(row, settings, catalog);

        let candidates = url_cell
            .split(LINE_SEPARATOR)
            .map(str::trim)
            .filter(|c| !c.is_empty());

        for (j, candidate) in candidates.enumerate() {
            let (platform, video_id) = match classify_video_url(candidate) {
                VideoLink::Known { platform, id } => (platform, id),
                VideoLink::Unknown(url) => {
                    tracing::debug!(row = i, position = j, url = %url, "Dropping unrecognized video URL");
                    continue;
                }
            };

            records.push(ResultRecord {
                id: format!("{source_id}-{i}-{j}"),
                video_id,
                video_type: platform,
                collection_no: fields.collection_no.clone(),
                servant_name: fields.servant_name.clone(),
                turn_count: fields.turn_count,
                note: fields.note.clone(),
                quest_name: fields.quest_name.clone(),
                date: fields.date.clone(),
            });
        }
    }

    records
}

/// Per-row values shared by every record fanned out from that row.
struct RowFields {
    collection_no: Option<String>,
    servant_name: Option<String>,
    turn_count: Option<u32>,
    note: Option<String>,
    quest_name: Option<String>,
    date: Option<String>,
}

impl RowFields {
    fn resolve(row: &[String], settings: &SourceSettings, catalog: &ServantCatalog) -> Self {
        let mapping = &settings.mapping;

        let (collection_no, servant_name) = match &mapping.servant_identify {
            ServantIdentify::CollectionNo { col } => {
                let no = cell(row, *col).map(str::to_string);
                let name = no
                    .as_deref()
                    .and_then(|n| catalog.get(n))
                    .map(|entry| entry.name.clone());
                (no, name)
            }
            ServantIdentify::Name { col } => (None, cell(row, *col).map(str::to_string)),
        };

        let turn_count = match &mapping.turn {
            TurnMapping::Fixed { count } => *count,
            TurnMapping::Import { col } => cell(row, *col).and_then(parse_leading_number),
        };

        let quest_name = match &mapping.quest_name {
            QuestNameMapping::Fixed { name } => name.clone(),
            QuestNameMapping::Import { col } => cell(row, *col).map(str::to_string),
        };

        Self {
            collection_no,
            servant_name,
            turn_count,
            note: join_notes(row, &mapping.notes),
            quest_name,
            date: mapping
                .date_col
                .and_then(|col| cell(row, col))
                .and_then(normalize_date),
        }
    }
}

/// Trimmed cell text, or `None` when the cell is missing or blank.
fn cell(row: &[String], col: ColumnIndex) -> Option<&str> {
    row.get(col).map(|c| c.trim()).filter(|c| !c.is_empty())
}

fn join_notes(row: &[String], notes: &[NoteColumn]) -> Option<String> {
    let parts: Vec<&str> = notes.iter().filter_map(|n| cell(row, n.col)).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Parse the leading decimal digits of a cell, so `"3T"` reads as 3. One
/// leading `+` is allowed. Text that does not start with a digit yields
/// `None`.
pub fn parse_leading_number(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}
