//! CSV body parsing.

use crate::error::FetchError;

/// Raw rows as read from a sheet: ragged, every cell trimmed.
pub type Rows = Vec<Vec<String>>;

/// Parse a CSV export body into rows.
///
/// There is no header row. Rows may have different lengths and lines that
/// are empty (or hold only separators and whitespace) are skipped.
pub fn parse_csv(body: &str) -> Result<Rows, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_and_trimming() {
        let rows = parse_csv("a, b ,c\n1,2\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2"]]);
    }

    #[test]
    fn quoted_cell_keeps_newlines() {
        let body = "Quest,3,1,\"https://youtu.be/dQw4w9WgXcQ\nhttps://x.com/u/status/1\"\n";
        let rows = parse_csv(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0][3],
            "https://youtu.be/dQw4w9WgXcQ\nhttps://x.com/u/status/1"
        );
    }

    #[test]
    fn skips_blank_lines() {
        let rows = parse_csv("a,b\n\n,\n  ,  \nc,d\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn empty_body() {
        assert!(parse_csv("").unwrap().is_empty());
    }
}
