//! Record sorting and the sort options offered for a given mapping.

use serde::{Deserialize, Serialize};

use crate::catalog::ServantCatalog;
use crate::mapper::{parse_leading_number, ResultRecord};
use crate::settings::{QuestNameMapping, ServantIdentify, SourceSettings, TurnMapping};

// ---------------------------------------------------------------------------
// Keys and order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Source row order.
    #[default]
    Default,
    Date,
    QuestName,
    TurnCount,
    CollectionNo,
    Class,
    Rarity,
    ServantName,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        Self::Default,
        Self::Date,
        Self::QuestName,
        Self::TurnCount,
        Self::CollectionNo,
        Self::Class,
        Self::Rarity,
        Self::ServantName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Date => "date",
            Self::QuestName => "questName",
            Self::TurnCount => "turnCount",
            Self::CollectionNo => "collectionNo",
            Self::Class => "class",
            Self::Rarity => "rarity",
            Self::ServantName => "servantName",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "元データ順",
            Self::Date => "達成日順",
            Self::QuestName => "クエスト名順",
            Self::TurnCount => "ターン数順",
            Self::CollectionNo => "マテリアルNo.順",
            Self::Class => "クラス順",
            Self::Rarity => "レアリティ順",
            Self::ServantName => "サーヴァント名順",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub value: SortKey,
    pub label: &'static str,
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

/// Sort keys that make sense for the active mapping modes, in display order.
///
/// [`sort_records`] accepts any key; this only decides what to offer.
pub fn available_sort_keys(settings: &SourceSettings) -> Vec<SortKey> {
    let mapping = &settings.mapping;
    let collection_no_mode = mapping.servant_identify.is_collection_no();

    SortKey::ALL
        .into_iter()
        .filter(|key| match key {
            SortKey::Default => true,
            SortKey::Date => mapping.date_col.is_some(),
            SortKey::QuestName => matches!(mapping.quest_name, QuestNameMapping::Import { .. }),
            SortKey::TurnCount => matches!(mapping.turn, TurnMapping::Import { .. }),
            SortKey::CollectionNo | SortKey::Class | SortKey::Rarity => collection_no_mode,
            SortKey::ServantName => matches!(mapping.servant_identify, ServantIdentify::Name { .. }),
        })
        .collect()
}

pub fn sort_options(settings: &SourceSettings) -> Vec<SortOption> {
    available_sort_keys(settings)
        .into_iter()
        .map(|value| SortOption {
            value,
            label: value.label(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Number(u32),
    Text(&'a str),
}

/// Stable sort by `key`. Records without a value for the key keep their
/// relative order and always come last, whichever the direction.
/// [`SortKey::Default`] keeps source order, or reverses it for `Desc`.
pub fn sort_records(
    records: &[ResultRecord],
    key: SortKey,
    order: SortOrder,
    catalog: &ServantCatalog,
) -> Vec<ResultRecord> {
    if key == SortKey::Default {
        let mut out = records.to_vec();
        if order == SortOrder::Desc {
            out.reverse();
        }
        return out;
    }

    let (mut keyed, missing): (Vec<_>, Vec<_>) = records
        .iter()
        .map(|r| (sort_value(r, key, catalog), r))
        .partition(|(value, _)| value.is_some());

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.cmp(b);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    keyed
        .into_iter()
        .chain(missing)
        .map(|(_, r)| r.clone())
        .collect()
}

fn sort_value<'a>(
    record: &'a ResultRecord,
    key: SortKey,
    catalog: &ServantCatalog,
) -> Option<SortValue<'a>> {
    let entry = || record.collection_no.as_deref().and_then(|no| catalog.get(no));

    match key {
        SortKey::Default => None,
        SortKey::Date => record.date.as_deref().map(SortValue::Text),
        SortKey::QuestName => record.quest_name.as_deref().map(SortValue::Text),
        SortKey::ServantName => record.servant_name.as_deref().map(SortValue::Text),
        SortKey::TurnCount => record.turn_count.map(SortValue::Number),
        SortKey::CollectionNo => record
            .collection_no
            .as_deref()
            .and_then(parse_leading_number)
            .map(SortValue::Number),
        SortKey::Class => entry().map(|e| SortValue::Number(e.class_name as u32)),
        SortKey::Rarity => entry().map(|e| SortValue::Number(u32::from(e.rarity))),
    }
}
