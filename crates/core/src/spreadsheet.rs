//! Spreadsheet identifier validation and pasted-URL parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::settings::SourceType;

static SPREADSHEET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

static SHEET_GID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

static GID_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#&?]gid=([0-9]+)").expect("valid regex"));

/// "Publish to web" links: `/spreadsheets/d/e/{id}`.
static PUBLIC_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/spreadsheets/d/e/([A-Za-z0-9_-]+)").expect("valid regex")
});

/// Share links: `/spreadsheets/d/{id}`.
static SHARED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A spreadsheet id is a non-empty run of `[A-Za-z0-9_-]`.
pub fn validate_spreadsheet_id(id: &str) -> Result<(), CoreError> {
    if SPREADSHEET_ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Spreadsheet id has an unrecognized format: {id:?}"
        )))
    }
}

/// A sheet gid is digits only.
pub fn validate_sheet_gid(gid: &str) -> Result<(), CoreError> {
    if SHEET_GID_RE.is_match(gid) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Sheet gid must be numeric: {gid:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// URL parsing
// ---------------------------------------------------------------------------

/// What could be read out of a pasted spreadsheet URL.
///
/// All three fields are `None` when neither path shape matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSpreadsheetUrl {
    #[serde(rename = "type")]
    pub source_type: Option<SourceType>,
    pub id: Option<String>,
    pub gid: Option<String>,
}

impl ParsedSpreadsheetUrl {
    pub fn is_recognized(&self) -> bool {
        self.source_type.is_some() && self.id.is_some()
    }
}

/// Extract `(type, id, gid)` from an arbitrary spreadsheet URL.
pub fn parse_spreadsheet_url(url: &str) -> ParsedSpreadsheetUrl {
    let url = url.trim();
    let gid = extract_gid(url);

    if let Some(caps) = PUBLIC_PATH_RE.captures(url) {
        return ParsedSpreadsheetUrl {
            source_type: Some(SourceType::Public),
            id: Some(caps[1].to_string()),
            gid,
        };
    }

    if let Some(caps) = SHARED_PATH_RE.captures(url) {
        return ParsedSpreadsheetUrl {
            source_type: Some(SourceType::Shared),
            id: Some(caps[1].to_string()),
            gid,
        };
    }

    ParsedSpreadsheetUrl::default()
}

/// Pull a `gid=` query or fragment parameter out of a URL.
pub fn extract_gid(url: &str) -> Option<String> {
    GID_PARAM_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Accept either a bare spreadsheet id or a full URL and return the id.
///
/// Input that matches neither path shape is returned trimmed, as-is.
pub fn extract_spreadsheet_id(input: &str) -> String {
    parse_spreadsheet_url(input)
        .id
        .unwrap_or_else(|| input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_with_gid() {
        let parsed = parse_spreadsheet_url(
            "https://docs.google.com/spreadsheets/d/e/2PACX-1vAbC_dE/pubhtml?gid=123&single=true",
        );
        assert_eq!(parsed.source_type, Some(SourceType::Public));
        assert_eq!(parsed.id.as_deref(), Some("2PACX-1vAbC_dE"));
        assert_eq!(parsed.gid.as_deref(), Some("123"));
        assert!(parsed.is_recognized());
    }

    #[test]
    fn shared_url_with_fragment_gid() {
        let parsed = parse_spreadsheet_url(
            "  https://docs.google.com/spreadsheets/d/1AbCdEf-_9/edit#gid=456  ",
        );
        assert_eq!(parsed.source_type, Some(SourceType::Shared));
        assert_eq!(parsed.id.as_deref(), Some("1AbCdEf-_9"));
        assert_eq!(parsed.gid.as_deref(), Some("456"));
    }

    #[test]
    fn shared_url_without_gid() {
        let parsed = parse_spreadsheet_url("https://docs.google.com/spreadsheets/d/abc/edit");
        assert_eq!(parsed.source_type, Some(SourceType::Shared));
        assert_eq!(parsed.gid, None);
    }

    #[test]
    fn unrecognized_url_yields_nothing() {
        let parsed = parse_spreadsheet_url("https://example.com/sheet?gid=7");
        assert_eq!(parsed, ParsedSpreadsheetUrl::default());
        assert!(!parsed.is_recognized());
    }

    #[test]
    fn extract_id_from_url_or_bare() {
        assert_eq!(
            extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/e/XYZ/pub"),
            "XYZ"
        );
        assert_eq!(extract_spreadsheet_id("  plain_id  "), "plain_id");
    }

    #[test]
    fn spreadsheet_id_rules() {
        assert!(validate_spreadsheet_id("2PACX-1v_abc").is_ok());
        assert!(validate_spreadsheet_id("").is_err());
        assert!(validate_spreadsheet_id("has space").is_err());
        assert!(validate_spreadsheet_id("slash/id").is_err());
    }

    #[test]
    fn sheet_gid_rules() {
        assert!(validate_sheet_gid("0").is_ok());
        assert!(validate_sheet_gid("1234567890").is_ok());
        assert!(validate_sheet_gid("").is_err());
        assert!(validate_sheet_gid("12a").is_err());
        assert!(validate_sheet_gid("-1").is_err());
    }
}
