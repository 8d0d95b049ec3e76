// src/report/mod.rs
use csv::ReaderBuilder;
use encoding_rs::Encoding;
use tracing::trace;

use crate::error::ReadError;

pub mod rules;
pub mod summary;
pub mod validator;

pub use summary::ReportSummary;
pub use validator::ReportValidator;

/// One fully parsed report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReport {
    /// Column names, from the first row of the file, in declared order.
    pub headers: Vec<String>,
    /// Each data row as one cell per field, in file order. Rows are kept
    /// positional; alignment against `headers` happens at access time, so
    /// a short row reads as empty for its trailing columns and a long
    /// row's excess cells are never reachable by name.
    pub rows: Vec<Vec<String>>,
}

impl ParsedReport {
    /// Index of `column` in `headers`, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Cell value of `row` for the header at `idx`, empty if the row is
    /// shorter than the header list.
    pub fn cell<'a>(&self, row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(String::as_str).unwrap_or_default()
    }
}

/// Decode `bytes` with `encoding` and parse the result as `;`-separated
/// values: first record is the header row, every following record a data
/// row. With `strict_rows`, a record whose field count differs from the
/// header count is a parse failure; otherwise raggedness is tolerated.
pub(crate) fn parse_bytes(
    bytes: &[u8],
    encoding: &'static Encoding,
    strict_rows: bool,
) -> Result<ParsedReport, ReadError> {
    let content = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(ReadError::Decode {
            encoding: encoding.name(),
        })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(!strict_rows)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    trace!(
        columns = headers.len(),
        rows = rows.len(),
        "parsed report content"
    );

    Ok(ParsedReport { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1252;

    #[test]
    fn parses_headers_and_positional_rows() {
        let content = "A;B;C\n1;2;3\n4;5;6\n";
        let report = parse_bytes(content.as_bytes(), WINDOWS_1252, false).unwrap();
        assert_eq!(report.headers, vec!["A", "B", "C"]);
        assert_eq!(report.rows, vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
    }

    #[test]
    fn quoted_fields_may_contain_the_delimiter() {
        let content = "A;B\n\"x;y\";2\n";
        let report = parse_bytes(content.as_bytes(), WINDOWS_1252, false).unwrap();
        assert_eq!(report.rows, vec![vec!["x;y", "2"]]);
    }

    #[test]
    fn header_only_file_yields_zero_rows() {
        let content = "A;B;C\n";
        let report = parse_bytes(content.as_bytes(), WINDOWS_1252, false).unwrap();
        assert_eq!(report.headers.len(), 3);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn lenient_mode_keeps_ragged_rows_as_read() {
        let content = "A;B;C\n1;2\n1;2;3;4\n";
        let report = parse_bytes(content.as_bytes(), WINDOWS_1252, false).unwrap();
        assert_eq!(report.rows[0], vec!["1", "2"]);
        assert_eq!(report.rows[1], vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn strict_mode_rejects_ragged_rows() {
        let content = "A;B;C\n1;2\n";
        let err = parse_bytes(content.as_bytes(), WINDOWS_1252, true).unwrap_err();
        assert!(matches!(err, ReadError::Csv(_)));
    }

    #[test]
    fn decodes_single_byte_western_content() {
        let (bytes, _, _) = WINDOWS_1252.encode("Código;Descrição\n7;Cartão\n");
        let report = parse_bytes(&bytes, WINDOWS_1252, false).unwrap();
        assert_eq!(report.headers, vec!["Código", "Descrição"]);
        assert_eq!(report.rows[0][1], "Cartão");
    }

    #[test]
    fn decode_failure_is_not_silently_replaced() {
        // 0xE7 is "ç" in windows-1252 but an invalid UTF-8 sequence.
        let bytes = b"A;B\n\xE7;2\n";
        let err = parse_bytes(bytes, encoding_rs::UTF_8, false).unwrap_err();
        assert!(matches!(err, ReadError::Decode { .. }));
    }
}
