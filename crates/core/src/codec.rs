//! Query-string codec for [`SourceSettings`].
//!
//! The whole configuration lives in the page URL, so this codec is the only
//! persistence mechanism. [`encode`] is total and lossless. [`decode`] never
//! fails: each field is validated on its own, falls back to its default
//! when absent or invalid, and invalid input raises the
//! `has_invalid_values` flag so the caller can rewrite the URL.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::settings::{
    ColumnIndex, DataSource, Mapping, NoteColumn, QuestNameMapping, ServantIdentify,
    SourceSettings, SourceType, TurnMapping, DEFAULT_QUEST_NAME_COL, DEFAULT_SERVANT_COL,
    DEFAULT_TURN_COL, DEFAULT_URL_COL, MAX_FIXED_QUEST_NAME_LENGTH,
};
use crate::spreadsheet::{validate_sheet_gid, validate_spreadsheet_id};

/// Flat query parameters, one value per key.
pub type QueryParams = BTreeMap<String, String>;

// ── Query keys ───────────────────────────────────────────────────────

pub const KEY_URL_TYPE: &str = "urlType";
pub const KEY_SPREADSHEET_ID: &str = "ssId";
pub const KEY_SHEET_GID: &str = "gid";
pub const KEY_URL_COL: &str = "urlIdx";
pub const KEY_DATE_COL: &str = "dateIdx";
pub const KEY_QUEST_MODE: &str = "qstMode";
pub const KEY_QUEST_COL: &str = "qstIdx";
pub const KEY_QUEST_FIXED: &str = "qstFixed";
pub const KEY_TURN_MODE: &str = "turnMode";
pub const KEY_TURN_COL: &str = "turnIdx";
pub const KEY_TURN_FIXED: &str = "turnFixed";
pub const KEY_SERVANT_MODE: &str = "svtMode";
pub const KEY_SERVANT_NO_COL: &str = "svtNoIdx";
pub const KEY_SERVANT_NAME_COL: &str = "svtNameIdx";
pub const KEY_NOTES: &str = "notes";

/// Every key the codec reads or writes.
pub const SETTINGS_KEYS: &[&str] = &[
    KEY_URL_TYPE,
    KEY_SPREADSHEET_ID,
    KEY_SHEET_GID,
    KEY_URL_COL,
    KEY_DATE_COL,
    KEY_QUEST_MODE,
    KEY_QUEST_COL,
    KEY_QUEST_FIXED,
    KEY_TURN_MODE,
    KEY_TURN_COL,
    KEY_TURN_FIXED,
    KEY_SERVANT_MODE,
    KEY_SERVANT_NO_COL,
    KEY_SERVANT_NAME_COL,
    KEY_NOTES,
];

const MODE_IMPORT: &str = "import";
const MODE_FIXED: &str = "fixed";
const MODE_COLLECTION_NO: &str = "collectionNo";
const MODE_NAME: &str = "name";

// ── Encode ───────────────────────────────────────────────────────────

/// Encode settings into query parameters.
///
/// Absent values (`id`, `gid`, a null fixed name or count, a null date
/// column, an empty note list) are omitted rather than written empty. An
/// empty id, gid or fixed name reads back as absent, so it is omitted too.
pub fn encode(settings: &SourceSettings) -> QueryParams {
    let mut params = QueryParams::new();
    let ds = &settings.data_source;
    let mapping = &settings.mapping;

    params.insert(KEY_URL_TYPE.into(), ds.source_type.as_str().into());
    if let Some(id) = non_empty(&ds.id) {
        params.insert(KEY_SPREADSHEET_ID.into(), id.to_string());
    }
    if let Some(gid) = non_empty(&ds.gid) {
        params.insert(KEY_SHEET_GID.into(), gid.to_string());
    }

    params.insert(KEY_URL_COL.into(), mapping.url_col.to_string());
    if let Some(col) = mapping.date_col {
        params.insert(KEY_DATE_COL.into(), col.to_string());
    }

    match &mapping.quest_name {
        QuestNameMapping::Import { col } => {
            params.insert(KEY_QUEST_MODE.into(), MODE_IMPORT.into());
            params.insert(KEY_QUEST_COL.into(), col.to_string());
        }
        QuestNameMapping::Fixed { name } => {
            params.insert(KEY_QUEST_MODE.into(), MODE_FIXED.into());
            if let Some(name) = non_empty(name) {
                params.insert(KEY_QUEST_FIXED.into(), name.to_string());
            }
        }
    }

    match &mapping.turn {
        TurnMapping::Import { col } => {
            params.insert(KEY_TURN_MODE.into(), MODE_IMPORT.into());
            params.insert(KEY_TURN_COL.into(), col.to_string());
        }
        TurnMapping::Fixed { count } => {
            params.insert(KEY_TURN_MODE.into(), MODE_FIXED.into());
            if let Some(count) = count {
                params.insert(KEY_TURN_FIXED.into(), count.to_string());
            }
        }
    }

    match &mapping.servant_identify {
        ServantIdentify::CollectionNo { col } => {
            params.insert(KEY_SERVANT_MODE.into(), MODE_COLLECTION_NO.into());
            params.insert(KEY_SERVANT_NO_COL.into(), col.to_string());
        }
        ServantIdentify::Name { col } => {
            params.insert(KEY_SERVANT_MODE.into(), MODE_NAME.into());
            params.insert(KEY_SERVANT_NAME_COL.into(), col.to_string());
        }
    }

    if !mapping.notes.is_empty() {
        params.insert(KEY_NOTES.into(), encode_notes(&mapping.notes));
    }

    params
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn encode_notes(notes: &[NoteColumn]) -> String {
    let items: Vec<Value> = notes
        .iter()
        .map(|n| serde_json::json!({ "label": n.label, "col": n.col }))
        .collect();
    Value::Array(items).to_string()
}

// ── Decode ───────────────────────────────────────────────────────────

/// Result of decoding a query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSettings {
    pub settings: SourceSettings,
    /// At least one present value failed validation and was replaced.
    pub has_invalid_values: bool,
}

/// Decode settings from query parameters. Never fails.
pub fn decode(params: &QueryParams) -> DecodedSettings {
    let mut d = Decoder {
        params,
        invalid: false,
    };

    let data_source = d.data_source();
    let mapping = d.mapping();

    DecodedSettings {
        settings: SourceSettings {
            data_source,
            mapping,
        },
        has_invalid_values: d.invalid,
    }
}

/// If `params` needed any repair, the canonical query string that should
/// replace it.
pub fn heal(params: &QueryParams) -> Option<String> {
    let decoded = decode(params);
    decoded
        .has_invalid_values
        .then(|| to_query_string(&encode(&decoded.settings)))
}

struct Decoder<'a> {
    params: &'a QueryParams,
    invalid: bool,
}

impl<'a> Decoder<'a> {
    fn get(&self, key: &str) -> Option<&'a str> {
        self.params.get(key).map(String::as_str)
    }

    /// Like [`Self::get`] but an empty value counts as absent.
    fn get_non_empty(&self, key: &str) -> Option<&'a str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    fn reject(&mut self, key: &str, value: &str) {
        tracing::debug!(key, value, "Invalid settings parameter, using default");
        self.invalid = true;
    }

    /// Read a column index; on failure keep `default` and flag.
    fn column(&mut self, key: &str, default: ColumnIndex) -> ColumnIndex {
        match self.get(key) {
            None => default,
            Some(raw) => match parse_column_index(raw) {
                Some(col) => col,
                None => {
                    self.reject(key, raw);
                    default
                }
            },
        }
    }

    fn data_source(&mut self) -> DataSource {
        let mut ds = DataSource::default();

        if let Some(raw) = self.get(KEY_URL_TYPE) {
            match SourceType::parse(raw) {
                Some(t) => ds.source_type = t,
                None => self.reject(KEY_URL_TYPE, raw),
            }
        }

        if let Some(raw) = self.get_non_empty(KEY_SPREADSHEET_ID) {
            match validate_spreadsheet_id(raw) {
                Ok(()) => ds.id = Some(raw.to_string()),
                Err(_) => self.reject(KEY_SPREADSHEET_ID, raw),
            }
        }

        if let Some(raw) = self.get_non_empty(KEY_SHEET_GID) {
            match validate_sheet_gid(raw) {
                Ok(()) => ds.gid = Some(raw.to_string()),
                Err(_) => self.reject(KEY_SHEET_GID, raw),
            }
        }

        ds
    }

    fn mapping(&mut self) -> Mapping {
        let url_col = self.column(KEY_URL_COL, DEFAULT_URL_COL);

        let date_col = match self.get(KEY_DATE_COL) {
            None => None,
            Some(raw) => match parse_column_index(raw) {
                Some(col) => Some(col),
                None => {
                    self.reject(KEY_DATE_COL, raw);
                    None
                }
            },
        };

        Mapping {
            url_col,
            notes: self.notes(),
            quest_name: self.quest_name(),
            turn: self.turn(),
            servant_identify: self.servant_identify(),
            date_col,
        }
    }

    fn quest_name(&mut self) -> QuestNameMapping {
        let Some(mode) = self.get(KEY_QUEST_MODE) else {
            return QuestNameMapping::default();
        };
        match mode {
            MODE_IMPORT => QuestNameMapping::Import {
                col: self.column(KEY_QUEST_COL, DEFAULT_QUEST_NAME_COL),
            },
            MODE_FIXED => {
                let name = match self.get_non_empty(KEY_QUEST_FIXED) {
                    None => None,
                    Some(raw) if raw.chars().count() <= MAX_FIXED_QUEST_NAME_LENGTH => {
                        Some(raw.to_string())
                    }
                    Some(raw) => {
                        self.reject(KEY_QUEST_FIXED, raw);
                        None
                    }
                };
                QuestNameMapping::Fixed { name }
            }
            other => {
                self.reject(KEY_QUEST_MODE, other);
                QuestNameMapping::default()
            }
        }
    }

    fn turn(&mut self) -> TurnMapping {
        let Some(mode) = self.get(KEY_TURN_MODE) else {
            return TurnMapping::default();
        };
        match mode {
            MODE_IMPORT => TurnMapping::Import {
                col: self.column(KEY_TURN_COL, DEFAULT_TURN_COL),
            },
            MODE_FIXED => {
                let count = match self.get_non_empty(KEY_TURN_FIXED) {
                    None => None,
                    Some(raw) => match raw.trim().parse::<u32>() {
                        Ok(n) => Some(n),
                        Err(_) => {
                            self.reject(KEY_TURN_FIXED, raw);
                            None
                        }
                    },
                };
                TurnMapping::Fixed { count }
            }
            other => {
                self.reject(KEY_TURN_MODE, other);
                TurnMapping::default()
            }
        }
    }

    fn servant_identify(&mut self) -> ServantIdentify {
        let Some(mode) = self.get(KEY_SERVANT_MODE) else {
            return ServantIdentify::default();
        };
        match mode {
            MODE_COLLECTION_NO => ServantIdentify::CollectionNo {
                col: self.column(KEY_SERVANT_NO_COL, DEFAULT_SERVANT_COL),
            },
            MODE_NAME => ServantIdentify::Name {
                col: self.column(KEY_SERVANT_NAME_COL, DEFAULT_SERVANT_COL),
            },
            other => {
                self.reject(KEY_SERVANT_MODE, other);
                ServantIdentify::default()
            }
        }
    }

    fn notes(&mut self) -> Vec<NoteColumn> {
        let Some(raw) = self.get_non_empty(KEY_NOTES) else {
            return Vec::new();
        };

        let items = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items,
            _ => {
                self.reject(KEY_NOTES, raw);
                return Vec::new();
            }
        };

        let mut notes = Vec::with_capacity(items.len());
        let mut dropped = 0usize;
        for item in &items {
            match decode_note(item) {
                Some(note) => notes.push(note),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "Dropped invalid note column entries");
            self.invalid = true;
        }
        notes
    }
}

fn decode_note(item: &Value) -> Option<NoteColumn> {
    let obj = item.as_object()?;
    let col = json_column_index(obj.get("col")?)?;
    let label = match obj.get("label") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return None,
    };
    Some(NoteColumn { label, col })
}

/// Parse a column index from its textual form.
pub fn parse_column_index(raw: &str) -> Option<ColumnIndex> {
    raw.trim().parse::<ColumnIndex>().ok()
}

fn json_column_index(value: &Value) -> Option<ColumnIndex> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return ColumnIndex::try_from(u).ok();
            }
            // Integral floats such as `2.0` are accepted.
            let f = n.as_f64()?;
            (f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as ColumnIndex)
        }
        Value::String(s) => parse_column_index(s),
        _ => None,
    }
}

// ── Query strings ────────────────────────────────────────────────────

/// Render parameters as a percent-encoded query string (no leading `?`).
pub fn to_query_string(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a raw query string. A leading `?` is ignored, `+` reads as a
/// space, and the first occurrence of a repeated key wins.
pub fn parse_query_string(query: &str) -> QueryParams {
    let mut params = QueryParams::new();
    let query = query.strip_prefix('?').unwrap_or(query);

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(decode_component(k))
            .or_insert_with(|| decode_component(v));
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Keep only the parameters the settings codec understands.
pub fn settings_params<'a, I>(pairs: I) -> QueryParams
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    pairs
        .into_iter()
        .filter(|(k, _)| SETTINGS_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
