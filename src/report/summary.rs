use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics for one parsed report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Number of data rows (header excluded).
    pub total_rows: usize,
    /// Number of columns declared by the header row.
    pub total_columns: usize,
    /// Column names in declared order.
    pub columns: Vec<String>,
    /// On-disk size of the source file, taken when the summary is built.
    pub file_size_bytes: u64,
    /// Count per distinct status value, present when the report carries
    /// the status column. Counts always sum to `total_rows`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_distribution: Option<BTreeMap<String, usize>>,
}
