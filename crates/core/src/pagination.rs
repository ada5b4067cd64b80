//! Page slicing for the record list.

use serde::Serialize;

/// Page sizes offered to the user.
pub const PER_PAGE_OPTIONS: [usize; 3] = [10, 20, 50];

pub const DEFAULT_PER_PAGE: usize = 20;

/// One page of items plus the totals needed to render page controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    /// Zero when there are no items.
    pub total_pages: usize,
}

/// Snap an arbitrary page size to one of [`PER_PAGE_OPTIONS`].
pub fn normalize_per_page(per_page: usize) -> usize {
    if PER_PAGE_OPTIONS.contains(&per_page) {
        per_page
    } else {
        DEFAULT_PER_PAGE
    }
}

/// Take page `page` (1-based, clamped into range) of `items`.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = normalize_per_page(per_page);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
