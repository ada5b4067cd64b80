//! Settings form validation.
//!
//! The settings form edits a flat, loosely typed [`SettingsDraft`]. Nothing
//! is committed until every field validates; failures are reported per
//! field, keyed by the draft's field name, so the form can show each one
//! next to its input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::settings::{
    ColumnIndex, DataSource, Mapping, NoteColumn, QuestNameMapping, ServantIdentify,
    SourceSettings, SourceType, TurnMapping, DEFAULT_QUEST_NAME_COL, DEFAULT_SERVANT_COL,
    DEFAULT_TURN_COL, MAX_FIXED_QUEST_NAME_LENGTH,
};
use crate::spreadsheet::{
    extract_gid, extract_spreadsheet_id, validate_sheet_gid, validate_spreadsheet_id,
};

const MSG_SELECT: &str = "選択してください";
const MSG_BAD_FORMAT: &str = "形式が正しくありません";
const MSG_NOT_NUMERIC: &str = "数値を入力してください";
const MSG_INVALID: &str = "値が不正です";
const MSG_NEGATIVE: &str = "0以上の数値を入力してください";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftMode {
    Import,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftServantMode {
    CollectionNo,
    Name,
}

/// The settings form as entered. Column indices are signed so that bad
/// input can be reported instead of rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDraft {
    pub url_type: Option<SourceType>,
    /// A bare spreadsheet id or a full spreadsheet URL.
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub sheet_gid: Option<String>,
    pub column_index: i64,
    #[serde(default)]
    pub date_column_index: Option<i64>,
    #[serde(default)]
    pub note_column_indices: Vec<i64>,
    pub quest_name_mode: DraftMode,
    pub quest_name_column_index: i64,
    #[serde(default)]
    pub fixed_quest_name: Option<String>,
    pub turn_count_mode: DraftMode,
    pub turn_count_column_index: i64,
    #[serde(default)]
    pub fixed_turn_count: Option<i64>,
    pub servant_identify_mode: DraftServantMode,
    pub servant_id_column_index: i64,
    pub servant_name_column_index: i64,
}

impl SettingsDraft {
    /// Fill the form from committed settings. Fields of the inactive mode
    /// carry their defaults.
    pub fn from_settings(settings: &SourceSettings) -> Self {
        let ds = &settings.data_source;
        let m = &settings.mapping;

        let (quest_name_mode, quest_name_column_index, fixed_quest_name) = match &m.quest_name {
            QuestNameMapping::Import { col } => (DraftMode::Import, *col, None),
            QuestNameMapping::Fixed { name } => {
                (DraftMode::Fixed, DEFAULT_QUEST_NAME_COL, name.clone())
            }
        };
        let (turn_count_mode, turn_count_column_index, fixed_turn_count) = match &m.turn {
            TurnMapping::Import { col } => (DraftMode::Import, *col, None),
            TurnMapping::Fixed { count } => {
                (DraftMode::Fixed, DEFAULT_TURN_COL, count.map(i64::from))
            }
        };
        let (servant_identify_mode, servant_id_column_index, servant_name_column_index) =
            match &m.servant_identify {
                ServantIdentify::CollectionNo { col } => {
                    (DraftServantMode::CollectionNo, *col, DEFAULT_SERVANT_COL)
                }
                ServantIdentify::Name { col } => {
                    (DraftServantMode::Name, DEFAULT_SERVANT_COL, *col)
                }
            };

        Self {
            url_type: Some(ds.source_type),
            spreadsheet_id: ds.id.clone().unwrap_or_default(),
            sheet_gid: ds.gid.clone(),
            column_index: to_signed(m.url_col),
            date_column_index: m.date_col.map(to_signed),
            note_column_indices: m.notes.iter().map(|n| to_signed(n.col)).collect(),
            quest_name_mode,
            quest_name_column_index: to_signed(quest_name_column_index),
            fixed_quest_name,
            turn_count_mode,
            turn_count_column_index: to_signed(turn_count_column_index),
            fixed_turn_count,
            servant_identify_mode,
            servant_id_column_index: to_signed(servant_id_column_index),
            servant_name_column_index: to_signed(servant_name_column_index),
        }
    }

    /// Validate every field and build the settings, or report all failures
    /// at once as [`CoreError::InvalidFields`].
    pub fn validate(&self) -> Result<SourceSettings, CoreError> {
        let mut errors = FieldErrors::default();

        let source_type = match self.url_type {
            Some(t) => t,
            None => {
                errors.add("urlType", MSG_SELECT);
                SourceType::default()
            }
        };

        let raw_id = self.spreadsheet_id.trim();
        let id = if raw_id.is_empty() {
            None
        } else {
            let id = extract_spreadsheet_id(raw_id);
            if validate_spreadsheet_id(&id).is_err() {
                errors.add("spreadsheetId", MSG_BAD_FORMAT);
            }
            Some(id)
        };

        let gid = match self.sheet_gid.as_deref().map(str::trim) {
            Some(gid) if !gid.is_empty() => {
                if validate_sheet_gid(gid).is_err() {
                    errors.add("sheetGid", MSG_NOT_NUMERIC);
                }
                Some(gid.to_string())
            }
            _ => extract_gid(raw_id),
        };

        let url_col = errors.column("columnIndex", self.column_index);
        let date_col = self
            .date_column_index
            .map(|c| errors.column("dateColumnIndex", c));

        let mut notes = Vec::with_capacity(self.note_column_indices.len());
        for &c in &self.note_column_indices {
            match ColumnIndex::try_from(c) {
                Ok(col) => notes.push(NoteColumn { label: None, col }),
                Err(_) => {
                    errors.add("noteColumn", MSG_INVALID);
                    break;
                }
            }
        }

        let servant_identify = match self.servant_identify_mode {
            DraftServantMode::CollectionNo => ServantIdentify::CollectionNo {
                col: errors.column("servantIdColumn", self.servant_id_column_index),
            },
            DraftServantMode::Name => ServantIdentify::Name {
                col: errors.column("servantNameColumn", self.servant_name_column_index),
            },
        };

        let turn = match self.turn_count_mode {
            DraftMode::Import => TurnMapping::Import {
                col: errors.column("turnCountColumn", self.turn_count_column_index),
            },
            DraftMode::Fixed => {
                let count = match self.fixed_turn_count {
                    None => None,
                    Some(n) => match u32::try_from(n) {
                        Ok(n) => Some(n),
                        Err(_) => {
                            errors.add("fixedTurnCount", MSG_NEGATIVE);
                            None
                        }
                    },
                };
                TurnMapping::Fixed { count }
            }
        };

        let quest_name = match self.quest_name_mode {
            DraftMode::Import => QuestNameMapping::Import {
                col: errors.column("questNameColumn", self.quest_name_column_index),
            },
            DraftMode::Fixed => {
                let name = self
                    .fixed_quest_name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                if name
                    .as_deref()
                    .is_some_and(|n| n.chars().count() > MAX_FIXED_QUEST_NAME_LENGTH)
                {
                    errors.add(
                        "fixedQuestName",
                        &format!("{MAX_FIXED_QUEST_NAME_LENGTH}文字以内で入力してください"),
                    );
                }
                QuestNameMapping::Fixed { name }
            }
        };

        errors.into_result()?;

        Ok(SourceSettings {
            data_source: DataSource {
                source_type,
                id,
                gid,
            },
            mapping: Mapping {
                url_col,
                notes,
                quest_name,
                turn,
                servant_identify,
                date_col,
            },
        })
    }
}

/// Check settings that arrive already structured rather than through the
/// form, and bring them to the shape [`SettingsDraft::validate`] produces:
/// an empty id, gid or fixed quest name becomes `None`. Errors use the same
/// field keys as the form.
pub fn validate_settings(settings: &SourceSettings) -> Result<SourceSettings, CoreError> {
    let mut errors = FieldErrors::default();
    let mut out = settings.clone();
    let blank_to_none = |v: Option<String>| v.filter(|v| !v.is_empty());

    let ds = &mut out.data_source;
    ds.id = blank_to_none(ds.id.take());
    if ds.id.as_deref().is_some_and(|id| validate_spreadsheet_id(id).is_err()) {
        errors.add("spreadsheetId", MSG_BAD_FORMAT);
    }
    ds.gid = blank_to_none(ds.gid.take());
    if ds.gid.as_deref().is_some_and(|gid| validate_sheet_gid(gid).is_err()) {
        errors.add("sheetGid", MSG_NOT_NUMERIC);
    }

    if let QuestNameMapping::Fixed { name } = &mut out.mapping.quest_name {
        *name = blank_to_none(name.take());
        if name
            .as_deref()
            .is_some_and(|n| n.chars().count() > MAX_FIXED_QUEST_NAME_LENGTH)
        {
            errors.add(
                "fixedQuestName",
                &format!("{MAX_FIXED_QUEST_NAME_LENGTH}文字以内で入力してください"),
            );
        }
    }

    errors.into_result()?;
    Ok(out)
}

impl Default for SettingsDraft {
    fn default() -> Self {
        Self::from_settings(&SourceSettings::default())
    }
}

fn to_signed(col: ColumnIndex) -> i64 {
    i64::try_from(col).unwrap_or(i64::MAX)
}

#[derive(Default)]
struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Only the first error per field is kept.
    fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    fn column(&mut self, field: &str, value: i64) -> ColumnIndex {
        ColumnIndex::try_from(value).unwrap_or_else(|_| {
            self.add(field, MSG_INVALID);
            0
        })
    }

    fn into_result(self) -> Result<(), CoreError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self.0))
        }
    }
}
