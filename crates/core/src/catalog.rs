//! Static servant reference table.
//!
//! Loaded once at startup from a JSON array and read-only afterwards. Entries
//! are keyed by the decimal string form of their collection number, which is
//! the form servant cells carry in spreadsheets.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Classes and rarities
// ---------------------------------------------------------------------------

/// Servant class, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServantClass {
    Saber,
    Archer,
    Lancer,
    Rider,
    Caster,
    Assassin,
    Berserker,
    Ruler,
    Avenger,
    AlterEgo,
    MoonCancer,
    Pretender,
    Foreigner,
    Shielder,
    Beast,
}

impl ServantClass {
    pub const ALL: [ServantClass; 15] = [
        Self::Saber,
        Self::Archer,
        Self::Lancer,
        Self::Rider,
        Self::Caster,
        Self::Assassin,
        Self::Berserker,
        Self::Ruler,
        Self::Avenger,
        Self::AlterEgo,
        Self::MoonCancer,
        Self::Pretender,
        Self::Foreigner,
        Self::Shielder,
        Self::Beast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saber => "saber",
            Self::Archer => "archer",
            Self::Lancer => "lancer",
            Self::Rider => "rider",
            Self::Caster => "caster",
            Self::Assassin => "assassin",
            Self::Berserker => "berserker",
            Self::Ruler => "ruler",
            Self::Avenger => "avenger",
            Self::AlterEgo => "alterEgo",
            Self::MoonCancer => "moonCancer",
            Self::Pretender => "pretender",
            Self::Foreigner => "foreigner",
            Self::Shielder => "shielder",
            Self::Beast => "beast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// One-character label used on filter chips.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Saber => "剣",
            Self::Archer => "弓",
            Self::Lancer => "槍",
            Self::Rider => "騎",
            Self::Caster => "術",
            Self::Assassin => "殺",
            Self::Berserker => "狂",
            Self::Ruler => "裁",
            Self::Avenger => "讐",
            Self::AlterEgo => "分",
            Self::MoonCancer => "月",
            Self::Pretender => "詐",
            Self::Foreigner => "降",
            Self::Shielder => "盾",
            Self::Beast => "獣",
        }
    }

    pub fn localized_label(&self) -> &'static str {
        match self {
            Self::Saber => "セイバー",
            Self::Archer => "アーチャー",
            Self::Lancer => "ランサー",
            Self::Rider => "ライダー",
            Self::Caster => "キャスター",
            Self::Assassin => "アサシン",
            Self::Berserker => "バーサーカー",
            Self::Ruler => "ルーラー",
            Self::Avenger => "アヴェンジャー",
            Self::AlterEgo => "アルターエゴ",
            Self::MoonCancer => "ムーンキャンサー",
            Self::Pretender => "プリテンダー",
            Self::Foreigner => "フォーリナー",
            Self::Shielder => "シールダー",
            Self::Beast => "ビースト",
        }
    }
}

impl std::fmt::Display for ServantClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MIN_RARITY: u8 = 0;
pub const MAX_RARITY: u8 = 5;

/// One entry of a selector option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_label: Option<String>,
}

/// Class selector options in display order.
pub fn class_options() -> Vec<SelectOption> {
    ServantClass::ALL
        .iter()
        .map(|c| SelectOption {
            value: c.as_str().to_string(),
            label: c.short_label().to_string(),
            long_label: Some(c.localized_label().to_string()),
        })
        .collect()
}

/// Rarity selector options, `★0` through `★5`.
pub fn rarity_options() -> Vec<SelectOption> {
    (MIN_RARITY..=MAX_RARITY)
        .map(|r| SelectOption {
            value: r.to_string(),
            label: format!("★{r}"),
            long_label: None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServantEntry {
    pub collection_no: u32,
    pub name: String,
    pub class_name: ServantClass,
    pub rarity: u8,
}

#[derive(Debug, Clone, Default)]
pub struct ServantCatalog {
    entries: HashMap<String, ServantEntry>,
}

impl ServantCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ServantEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.collection_no.to_string(), e))
                .collect(),
        }
    }

    /// Parse a JSON array of servant entries. Extra fields are ignored.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<ServantEntry> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid servant catalog: {e}")))?;

        if let Some(bad) = entries.iter().find(|e| e.rarity > MAX_RARITY) {
            return Err(CoreError::Validation(format!(
                "Servant {} has rarity {} (max {MAX_RARITY})",
                bad.collection_no, bad.rarity
            )));
        }

        Ok(Self::from_entries(entries))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Look up by collection number as it appears in a cell, e.g. `"1"`.
    pub fn get(&self, collection_no: &str) -> Option<&ServantEntry> {
        self.entries.get(collection_no)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
