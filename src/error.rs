use std::path::PathBuf;
use thiserror::Error;

/// Result type for report validation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the report validator.
#[derive(Error, Debug)]
pub enum Error {
    /// Report file did not exist when the validator was constructed.
    /// Fatal to the instance; never retried.
    #[error("report file not found: {path}")]
    NotFound { path: PathBuf },

    /// I/O, decode, or CSV-structure failure while parsing the report.
    #[error("failed to read report {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    /// Requested column is absent from the report headers. Signals a
    /// caller/schema mismatch, not a transient fault.
    #[error("column '{column}' not found in report headers")]
    ColumnNotFound { column: String },
}

/// Underlying cause of an [`Error::Read`].
#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// File bytes are not valid for the configured encoding.
    #[error("file contents are not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
