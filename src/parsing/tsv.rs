use std::path::Path;

use thiserror::Error;

use crate::core::grouping::{RawRow, ROW_COLUMNS};
use crate::utils::validation::check_row_limit;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid segment table: {0}")]
    InvalidFormat(String),

    #[error("Too many rows: {0} exceeds maximum allowed")]
    TooManyRows(usize),
}

/// Cell values treated as absent, besides the empty string
const ABSENT_MARKERS: [&str; 2] = ["NA", "NULL"];

/// Parse a TSV/CSV file of segment rows
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_rows_file(path: &Path, delimiter: char) -> Result<Vec<RawRow>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_rows_text(&content, delimiter)
}

/// Parse segment rows with columns
/// `collection, query, hit, hsp, query_start, query_end, hit_start, hit_end, gaps, positive, identity, score`.
///
/// Only the table shape is checked here. Cells are kept as text and converted
/// when rows are grouped, so a bad number is reported with its row and column.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has more columns than expected
/// or no rows are found, or `ParseError::TooManyRows` if the limit is exceeded.
pub fn parse_rows_text(text: &str, delimiter: char) -> Result<Vec<RawRow>, ParseError> {
    let mut rows = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "collection" || first == "database" || first == "blastoutput_db" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() > ROW_COLUMNS.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {}",
                fields.len(),
                ROW_COLUMNS.len()
            )));
        }

        if check_row_limit(rows.len()).is_some() {
            return Err(ParseError::TooManyRows(rows.len()));
        }

        let cells = fields
            .into_iter()
            .map(|f| (!f.is_empty() && !ABSENT_MARKERS.contains(&f)).then(|| f.to_string()))
            .collect();
        rows.push(RawRow::new(cells));
    }

    if rows.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No segment rows found".to_string(),
        ));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BestHitError;
    use crate::core::grouping::GroupedHits;

    #[test]
    fn test_parse_tsv_text() {
        let tsv = "\
collection\tquery\thit\thsp\tquery_start\tquery_end\thit_start\thit_end\tgaps\tpositive\tidentity\tscore
nr\tNP_001005221.2\t1\t1\t1\t10\t1\t10\t0\t9\t8\t20.5
nr\tNP_001005221.2\t1\t2\t5\t30\t5\t30\t1\t20\t18\t40
";

        let rows = parse_rows_text(tsv, '\t').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0].as_deref(), Some("nr"));
        assert_eq!(rows[1].cells[11].as_deref(), Some("40"));

        let grouped = GroupedHits::from_rows(rows).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.segment_count(), 2);
    }

    #[test]
    fn test_parse_csv_without_header() {
        let csv = "nr,q1,1,1,1,10,1,10,0,9,8,20\nnr,q2,1,1,1,10,1,10,0,9,8,20\n";
        let rows = parse_rows_text(csv, ',').unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_comments_before_header() {
        let tsv = "# exported rows\n\ndatabase\tqgb\thit\thsp\tqfrom\tqto\thfrom\thto\tgaps\tpos\tident\tscore\nnr\tq1\t1\t1\t1\t10\t1\t10\t0\t9\t8\t20\n";
        let rows = parse_rows_text(tsv, '\t').unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[1].as_deref(), Some("q1"));
    }

    #[test]
    fn test_absent_markers_become_none() {
        let tsv = "nr\tq1\t1\t1\t1\t10\t1\t10\tNA\t9\tNULL\t\n";
        let rows = parse_rows_text(tsv, '\t').unwrap();
        assert_eq!(rows[0].cells[8], None);
        assert_eq!(rows[0].cells[10], None);
        assert_eq!(rows[0].cells[11], None);

        let err = GroupedHits::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            BestHitError::MalformedRow {
                column: "gaps",
                value: None,
                ..
            }
        ));
    }

    #[test]
    fn test_too_many_fields() {
        let tsv = "nr\tq1\t1\t1\t1\t10\t1\t10\t0\t9\t8\t20\textra\n";
        let err = parse_rows_text(tsv, '\t').unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("13 fields")));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_rows_text("# nothing here\n", '\t'),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
