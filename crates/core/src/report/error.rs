//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Zero matching records. Distinct from a report with zero groups: a
    /// caller holding this value has nothing to render or export.
    #[error("No sales found in the selected period")]
    NoRecords,
}
