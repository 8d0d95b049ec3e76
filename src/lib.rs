//! Validation of `;`-separated transaction-report exports.
//!
//! [`ReportValidator`] is handed the path of an already-downloaded report
//! file, parses it once on first use, and answers schema and content
//! questions about it: required columns, status vocabulary, date formats,
//! emptiness, and summary statistics.

pub mod error;
pub mod report;

pub use error::{Error, ReadError, Result};
pub use report::{rules, ParsedReport, ReportSummary, ReportValidator};
