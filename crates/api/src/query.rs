//! Query parameter parsing shared by the handlers.
//!
//! Settings travel in the query string under the codec's keys. The record
//! listing adds filter, sort and page keys on top. Filter values that do not
//! parse are ignored (the filter stays inactive) rather than rejected.

use questreel_core::catalog::{ServantClass, MAX_RARITY};
use questreel_core::codec::{self, QueryParams};
use questreel_core::filter::FilterCriteria;
use questreel_core::pagination::DEFAULT_PER_PAGE;
use questreel_core::sort::{SortKey, SortOrder};

pub const KEY_CLASSES: &str = "classes";
pub const KEY_RARITIES: &str = "rarities";
pub const KEY_MIN_TURN: &str = "minTurn";
pub const KEY_MAX_TURN: &str = "maxTurn";
pub const KEY_SERVANT_NO: &str = "svtNo";
pub const KEY_SERVANT_NAME: &str = "svtName";
pub const KEY_NOTE: &str = "note";
pub const KEY_QUEST: &str = "quest";
pub const KEY_SORT: &str = "sort";
pub const KEY_ORDER: &str = "order";
pub const KEY_PAGE: &str = "page";
pub const KEY_PER_PAGE: &str = "perPage";
pub const KEY_REFRESH: &str = "refresh";

/// Parse the raw query string from `axum::extract::RawQuery`.
pub fn params_from_raw(raw: Option<&str>) -> QueryParams {
    raw.map(codec::parse_query_string).unwrap_or_default()
}

/// Filter, sort and page selection for `GET /records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub criteria: FilterCriteria,
    pub sort: SortKey,
    pub order: SortOrder,
    pub page: usize,
    pub per_page: usize,
    /// Bypass the sheet cache for this request.
    pub refresh: bool,
}

impl ListParams {
    pub fn from_params(params: &QueryParams) -> Self {
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let number = |key: &str| get(key).and_then(|v| v.parse::<u32>().ok());
        let text = |key: &str| get(key).map(str::to_string);

        let classes = get(KEY_CLASSES)
            .map(|v| comma_list(v).filter_map(ServantClass::parse).collect())
            .unwrap_or_default();
        let rarities = get(KEY_RARITIES)
            .map(|v| {
                comma_list(v)
                    .filter_map(|r| r.parse::<u8>().ok())
                    .filter(|r| *r <= MAX_RARITY)
                    .collect()
            })
            .unwrap_or_default();

        let criteria = FilterCriteria {
            classes,
            rarities,
            min_turn: number(KEY_MIN_TURN),
            max_turn: number(KEY_MAX_TURN),
            servant_collection_no: number(KEY_SERVANT_NO),
            servant_name: text(KEY_SERVANT_NAME),
            note: text(KEY_NOTE),
            quest_name: text(KEY_QUEST),
        };

        Self {
            criteria,
            sort: get(KEY_SORT).and_then(SortKey::parse).unwrap_or_default(),
            order: get(KEY_ORDER).and_then(SortOrder::parse).unwrap_or_default(),
            page: get(KEY_PAGE)
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            per_page: get(KEY_PER_PAGE)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PER_PAGE),
            refresh: get(KEY_REFRESH).is_some_and(|v| v == "true" || v == "1"),
        }
    }
}

fn comma_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_gives_defaults() {
        let p = ListParams::from_params(&params_from_raw(None));
        assert!(p.criteria.is_empty());
        assert_eq!(p.sort, SortKey::Default);
        assert_eq!(p.order, SortOrder::Asc);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, DEFAULT_PER_PAGE);
        assert!(!p.refresh);
    }

    #[test]
    fn parses_every_key() {
        let raw = "classes=saber,%20archer,gunner&rarities=5,4,9,x&minTurn=1&maxTurn=3\
                   &svtNo=2&svtName=Art&note=solo&quest=%E9%AB%98&sort=turnCount&order=desc\
                   &page=2&perPage=50&refresh=true";
        let p = ListParams::from_params(&params_from_raw(Some(raw)));
        assert_eq!(p.criteria.classes, vec![ServantClass::Saber, ServantClass::Archer]);
        assert_eq!(p.criteria.rarities, vec![5, 4]);
        assert_eq!(p.criteria.min_turn, Some(1));
        assert_eq!(p.criteria.max_turn, Some(3));
        assert_eq!(p.criteria.servant_collection_no, Some(2));
        assert_eq!(p.criteria.servant_name.as_deref(), Some("Art"));
        assert_eq!(p.criteria.note.as_deref(), Some("solo"));
        assert_eq!(p.criteria.quest_name.as_deref(), Some("高"));
        assert_eq!(p.sort, SortKey::TurnCount);
        assert_eq!(p.order, SortOrder::Desc);
        assert_eq!(p.page, 2);
        assert_eq!(p.per_page, 50);
        assert!(p.refresh);
    }

    #[test]
    fn unparseable_values_are_ignored() {
        let raw = "minTurn=abc&maxTurn=-1&svtNo=&sort=bogus&order=up&page=zero";
        let p = ListParams::from_params(&params_from_raw(Some(raw)));
        assert!(p.criteria.is_empty());
        assert_eq!(p.sort, SortKey::Default);
        assert_eq!(p.order, SortOrder::Asc);
        assert_eq!(p.page, 1);
    }
}
