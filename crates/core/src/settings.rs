//! Source settings: which spreadsheet to read and how its columns map onto
//! record fields.
//!
//! [`SourceSettings::default`] is the single authoritative default. Every
//! consumer that meets a missing or unparseable field substitutes the
//! matching default field rather than failing.

use serde::{Deserialize, Serialize};

/// Zero-based column position within a spreadsheet row.
///
/// No upper bound is enforced; an index past the end of a row reads as an
/// empty cell.
pub type ColumnIndex = usize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_URL_COL: ColumnIndex = 3;
pub const DEFAULT_QUEST_NAME_COL: ColumnIndex = 0;
pub const DEFAULT_TURN_COL: ColumnIndex = 1;
pub const DEFAULT_SERVANT_COL: ColumnIndex = 2;

/// Maximum length, in characters, of a fixed quest name.
pub const MAX_FIXED_QUEST_NAME_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// How the spreadsheet was shared, which decides the export URL shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// "Publish to web".
    #[default]
    Public,
    /// "Anyone with the link".
    Shared,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Shared => "shared",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "shared" => Some(Self::Shared),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSource {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Opaque spreadsheet id. `None` disables fetching.
    pub id: Option<String>,
    /// Opaque sheet id within the spreadsheet.
    pub gid: Option<String>,
}

impl DataSource {
    /// Whether there is anything to fetch.
    pub fn is_configured(&self) -> bool {
        self.id.is_some()
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// One column contributing to the per-record note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteColumn {
    pub label: Option<String>,
    pub col: ColumnIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum QuestNameMapping {
    Import { col: ColumnIndex },
    Fixed { name: Option<String> },
}

impl Default for QuestNameMapping {
    fn default() -> Self {
        Self::Import {
            col: DEFAULT_QUEST_NAME_COL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TurnMapping {
    Import { col: ColumnIndex },
    Fixed { count: Option<u32> },
}

impl Default for TurnMapping {
    fn default() -> Self {
        Self::Import {
            col: DEFAULT_TURN_COL,
        }
    }
}

/// How the servant of each row is identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ServantIdentify {
    /// Numeric catalog id; enables class and rarity lookups.
    CollectionNo { col: ColumnIndex },
    /// Free-text name; no catalog lookup.
    Name { col: ColumnIndex },
}

impl ServantIdentify {
    pub fn col(&self) -> ColumnIndex {
        match self {
            Self::CollectionNo { col } | Self::Name { col } => *col,
        }
    }

    pub fn is_collection_no(&self) -> bool {
        matches!(self, Self::CollectionNo { .. })
    }
}

impl Default for ServantIdentify {
    fn default() -> Self {
        Self::CollectionNo {
            col: DEFAULT_SERVANT_COL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub url_col: ColumnIndex,
    #[serde(default)]
    pub notes: Vec<NoteColumn>,
    #[serde(default)]
    pub quest_name: QuestNameMapping,
    #[serde(default)]
    pub turn: TurnMapping,
    #[serde(default)]
    pub servant_identify: ServantIdentify,
    #[serde(default)]
    pub date_col: Option<ColumnIndex>,
}

impl Default for Mapping {
    fn default() -> Self {
        Self {
            url_col: DEFAULT_URL_COL,
            notes: Vec::new(),
            quest_name: QuestNameMapping::default(),
            turn: TurnMapping::default(),
            servant_identify: ServantIdentify::default(),
            date_col: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The complete persisted configuration. Replaced wholesale on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSettings {
    pub data_source: DataSource,
    pub mapping: Mapping,
}
