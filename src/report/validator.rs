use encoding_rs::{Encoding, WINDOWS_1252};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::error::{Error, ReadError, Result};
use crate::report::rules::{self, EXPECTED_COLUMNS, STATUS_COLUMN, VALID_STATUSES};
use crate::report::{parse_bytes, ParsedReport, ReportSummary};

/// Lifecycle of the backing report data. A header-only file parses to
/// `Loaded` with zero rows, which is distinct from `Unloaded`.
#[derive(Debug)]
enum State {
    Unloaded,
    Loaded(ParsedReport),
}

/// Validator for one downloaded transaction-report export.
///
/// Construction checks that the file exists but reads nothing; the first
/// validation call (or an explicit [`read`](Self::read)) parses the file
/// once and keeps the result for the lifetime of the instance.
///
/// ```no_run
/// use reportcheck::ReportValidator;
///
/// # fn main() -> reportcheck::Result<()> {
/// let mut validator = ReportValidator::new("relatorio.csv")?;
/// assert!(validator.validate_headers()?);
/// assert!(validator.validate_not_empty()?);
/// assert!(validator.validate_status_values(None)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReportValidator {
    path: PathBuf,
    encoding: &'static Encoding,

    /// Reject ragged data rows instead of truncating/padding them.
    strict_rows: bool,

    state: State,
}

impl ReportValidator {
    /// Encoding the producing system emits by default (ISO-8859-1 class).
    pub const DEFAULT_ENCODING: &'static Encoding = WINDOWS_1252;

    /// Validator over `path` with the default single-byte encoding.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_encoding(path, Self::DEFAULT_ENCODING)
    }

    /// Validator over `path` decoding with `encoding`. Fails with
    /// [`Error::NotFound`] if the path does not reference an existing
    /// file; content problems only surface when parsing is triggered.
    pub fn with_encoding(path: impl Into<PathBuf>, encoding: &'static Encoding) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::NotFound { path });
        }
        info!(path = %path.display(), encoding = encoding.name(), "report validator initialized");
        Ok(Self {
            path,
            encoding,
            strict_rows: false,
            state: State::Unloaded,
        })
    }

    /// Opt into strict parsing: a data row whose field count differs from
    /// the header count fails [`read`](Self::read) instead of being
    /// silently truncated or padded.
    pub fn strict_rows(mut self, strict: bool) -> Self {
        self.strict_rows = strict;
        self
    }

    /// Parse the file with the configured encoding and `;` delimiter and
    /// replace any previously loaded data. On failure the previous state
    /// is left untouched, never half-populated. Returns the data-row
    /// count of the fresh parse.
    ///
    /// Invoking this again re-executes the parse; the validation methods
    /// below only call it when nothing is loaded yet.
    pub fn read(&mut self) -> Result<usize> {
        let bytes = fs::read(&self.path).map_err(|e| self.read_error(e.into()))?;
        let report = parse_bytes(&bytes, self.encoding, self.strict_rows)
            .map_err(|e| self.read_error(e))?;
        let rows = report.rows.len();
        info!(path = %self.path.display(), rows, "report parsed");
        self.state = State::Loaded(report);
        Ok(rows)
    }

    fn read_error(&self, source: ReadError) -> Error {
        error!(path = %self.path.display(), %source, "failed to read report");
        Error::Read {
            path: self.path.clone(),
            source,
        }
    }

    /// Parsed data, loading it first if this instance has not read the
    /// file yet.
    pub fn report(&mut self) -> Result<&ParsedReport> {
        if matches!(self.state, State::Unloaded) {
            self.read()?;
        }
        match &self.state {
            State::Loaded(report) => Ok(report),
            State::Unloaded => unreachable!("read() either loads or errors"),
        }
    }

    /// True iff every expected column is present in the header row.
    /// Exact, case-sensitive match; extra columns never cause failure.
    pub fn validate_headers(&mut self) -> Result<bool> {
        let missing = self.missing_columns()?;
        if !missing.is_empty() {
            error!(?missing, "expected columns missing from report");
            return Ok(false);
        }
        info!("all expected columns present");
        Ok(true)
    }

    /// Expected columns absent from the loaded headers, in rule order.
    pub fn missing_columns(&mut self) -> Result<Vec<&'static str>> {
        let report = self.report()?;
        Ok(EXPECTED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !report.headers.iter().any(|h| h == col))
            .collect())
    }

    /// True iff the report carries at least one data row.
    pub fn validate_not_empty(&mut self) -> Result<bool> {
        let rows = self.row_count()?;
        if rows > 0 {
            info!(rows, "report contains data rows");
        } else {
            warn!("report is empty (headers only)");
        }
        Ok(rows > 0)
    }

    /// All values of `column`, in row order. A row shorter than the
    /// header list contributes an empty string for that column.
    pub fn column_values(&mut self, column: &str) -> Result<Vec<String>> {
        let report = self.report()?;
        let idx = report
            .column_index(column)
            .ok_or_else(|| Error::ColumnNotFound {
                column: column.to_string(),
            })?;
        let values: Vec<String> = report
            .rows
            .iter()
            .map(|row| report.cell(row, idx).to_string())
            .collect();
        debug!(column, count = values.len(), "extracted column values");
        Ok(values)
    }

    /// True iff no row's value for `column` is empty or whitespace-only.
    pub fn validate_column_not_empty(&mut self, column: &str) -> Result<bool> {
        let values = self.column_values(column)?;
        let empty = values.iter().filter(|v| v.trim().is_empty()).count();
        if empty > 0 {
            warn!(column, empty, "column has empty values");
            return Ok(false);
        }
        debug!(column, "column has no empty values");
        Ok(true)
    }

    /// Check the status column against the closed vocabulary, and, when
    /// `expected` is given, additionally require every row to carry
    /// exactly that status. The integrity check runs first: any value
    /// outside the vocabulary fails regardless of `expected`.
    pub fn validate_status_values(&mut self, expected: Option<&str>) -> Result<bool> {
        let statuses = self.column_values(STATUS_COLUMN)?;

        let invalid: Vec<&str> = statuses
            .iter()
            .map(String::as_str)
            .filter(|s| !VALID_STATUSES.contains(*s))
            .collect();
        if !invalid.is_empty() {
            error!(?invalid, "statuses outside the known vocabulary");
            return Ok(false);
        }

        if let Some(expected) = expected {
            let wrong = statuses.iter().filter(|s| s.as_str() != expected).count();
            if wrong > 0 {
                error!(expected, wrong, "rows do not carry the expected status");
                return Ok(false);
            }
            info!(expected, rows = statuses.len(), "every row carries the expected status");
        } else {
            info!(rows = statuses.len(), "all statuses are valid");
        }
        Ok(true)
    }

    /// True iff every non-empty value of `column` parses under one of the
    /// accepted date formats. Empty values are vacuously valid (optional
    /// date columns). The whole column is always evaluated; diagnostics
    /// report at most the first 5 offenders.
    pub fn validate_date_format(&mut self, column: &str) -> Result<bool> {
        let values = self.column_values(column)?;
        let invalid: Vec<&str> = values
            .iter()
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty() && !rules::is_valid_date(v))
            .collect();
        if !invalid.is_empty() {
            let sample = &invalid[..invalid.len().min(5)];
            error!(column, total = invalid.len(), ?sample, "invalid dates in column");
            return Ok(false);
        }
        debug!(column, "all dates match the accepted formats");
        Ok(true)
    }

    /// Number of data rows, header excluded.
    pub fn row_count(&mut self) -> Result<usize> {
        Ok(self.report()?.rows.len())
    }

    /// Summary statistics for the report. The file size is taken from
    /// disk at call time, not from the cached parse.
    pub fn summary(&mut self) -> Result<ReportSummary> {
        let file_size_bytes = fs::metadata(&self.path)
            .map_err(|e| self.read_error(e.into()))?
            .len();

        let report = self.report()?;
        let status_distribution = report.column_index(STATUS_COLUMN).map(|idx| {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for row in &report.rows {
                *counts.entry(report.cell(row, idx).to_string()).or_insert(0) += 1;
            }
            counts
        });

        let summary = ReportSummary {
            total_rows: report.rows.len(),
            total_columns: report.headers.len(),
            columns: report.headers.clone(),
            file_size_bytes,
            status_distribution,
        };
        info!(rows = summary.total_rows, columns = summary.total_columns, "report summary built");
        Ok(summary)
    }
}
