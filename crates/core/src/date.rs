//! Date cell normalization to `YYYY/MM/DD`.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// `Y/M/D` or `Y-M-D`; each separator may be either character.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,4})[/-](\d{1,2})[/-](\d{1,2})$").expect("valid regex")
});

/// Normalize a raw date cell, or `None` if it is not a real calendar date.
///
/// Two-digit (and shorter) years are read as 20xx.
pub fn normalize_date(raw: &str) -> Option<String> {
    let caps = DATE_RE.captures(raw.trim())?;
    let mut year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    if year < 100 {
        year += 2000;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date.year() != year || date.month() != month || date.day() != day {
        return None;
    }
    Some(format!("{year:04}/{month:02}/{day:02}"))
}
