//! Record filtering.
//!
//! Every criterion is optional and the active ones combine with AND. Some
//! criteria only make sense under particular mapping modes and are ignored
//! otherwise: class and rarity need catalog lookups (collectionNo mode),
//! turn bounds need imported turn counts, and the quest filter needs
//! imported quest names. Substring matches are literal and case-sensitive.

use serde::{Deserialize, Serialize};

use crate::catalog::{ServantCatalog, ServantClass};
use crate::mapper::{parse_leading_number, ResultRecord};
use crate::settings::{QuestNameMapping, ServantIdentify, SourceSettings, TurnMapping};

/// Collection number of the unit whose displayed rarity varies.
pub const MASH_COLLECTION_NO: &str = "1";

/// Any of these in the rarity selection lets [`MASH_COLLECTION_NO`] through.
pub const MASH_RARITIES: [u8; 3] = [3, 4, 5];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub classes: Vec<ServantClass>,
    pub rarities: Vec<u8>,
    pub min_turn: Option<u32>,
    pub max_turn: Option<u32>,
    pub servant_collection_no: Option<u32>,
    pub servant_name: Option<String>,
    pub note: Option<String>,
    pub quest_name: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Keep the records that satisfy every active criterion, in their original
/// order. Applying the same criteria twice gives the same result.
pub fn apply_filters(
    records: &[ResultRecord],
    criteria: &FilterCriteria,
    settings: &SourceSettings,
    catalog: &ServantCatalog,
) -> Vec<ResultRecord> {
    records
        .iter()
        .filter(|r| passes(r, criteria, settings, catalog))
        .cloned()
        .collect()
}

fn passes(
    record: &ResultRecord,
    criteria: &FilterCriteria,
    settings: &SourceSettings,
    catalog: &ServantCatalog,
) -> bool {
    let mapping = &settings.mapping;

    match &mapping.servant_identify {
        ServantIdentify::CollectionNo { .. } => {
            let entry = record.collection_no.as_deref().and_then(|no| catalog.get(no));

            if !criteria.classes.is_empty() {
                let class = entry.map(|e| e.class_name);
                if !class.is_some_and(|c| criteria.classes.contains(&c)) {
                    return false;
                }
            }

            if !criteria.rarities.is_empty() {
                let rarity = entry.map(|e| e.rarity);
                let selected = rarity.is_some_and(|r| criteria.rarities.contains(&r));
                if !selected && !mash_override(record, &criteria.rarities) {
                    return false;
                }
            }

            if let Some(wanted) = criteria.servant_collection_no {
                let actual = record.collection_no.as_deref().and_then(parse_leading_number);
                if actual != Some(wanted) {
                    return false;
                }
            }
        }
        ServantIdentify::Name { .. } => {
            if let Some(needle) = non_empty(&criteria.servant_name) {
                if !contains(&record.servant_name, needle) {
                    return false;
                }
            }
        }
    }

    if matches!(mapping.turn, TurnMapping::Import { .. }) {
        if let Some(min) = criteria.min_turn {
            if !record.turn_count.is_some_and(|t| t >= min) {
                return false;
            }
        }
        if let Some(max) = criteria.max_turn {
            if !record.turn_count.is_some_and(|t| t <= max) {
                return false;
            }
        }
    }

    if let Some(needle) = non_empty(&criteria.note) {
        if !contains(&record.note, needle) {
            return false;
        }
    }

    if matches!(mapping.quest_name, QuestNameMapping::Import { .. }) {
        if let Some(needle) = non_empty(&criteria.quest_name) {
            if !contains(&record.quest_name, needle) {
                return false;
            }
        }
    }

    true
}

/// Collection number 1 passes a rarity filter whenever 3, 4 or 5 is
/// selected, whatever its catalog rarity.
fn mash_override(record: &ResultRecord, rarities: &[u8]) -> bool {
    record.collection_no.as_deref() == Some(MASH_COLLECTION_NO)
        && MASH_RARITIES.iter().any(|r| rarities.contains(r))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A missing field reads as the empty string.
fn contains(field: &Option<String>, needle: &str) -> bool {
    field.as_deref().unwrap_or("").contains(needle)
}
