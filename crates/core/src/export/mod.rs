//! Report export renderers.
//!
//! Both formats render the same already-validated
//! [`SalesReport`](crate::report::SalesReport) structure;
//! neither re-aggregates, so the two outputs always carry identical semantic
//! content. PDF output is paginated (landscape A4); XLSX output is a single
//! flat sheet.

pub mod pdf;
pub mod xlsx;

use thiserror::Error;

use crate::report::DateRange;

pub use pdf::export_pdf;
pub use xlsx::export_xlsx;

/// Errors that can occur while rendering an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The spreadsheet writer failed.
    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// Deterministic download file name for a report export, embedding both
/// boundary dates: `sales-report-2024-01-05-2024-01-06.pdf`.
#[must_use]
pub fn export_file_name(range: DateRange, extension: &str) -> String {
    format!("sales-report-{}-{}.{extension}", range.start, range.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_file_name_embeds_both_dates() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
        )
        .unwrap();
        assert_eq!(
            export_file_name(range, "pdf"),
            "sales-report-2024-01-05-2024-02-06.pdf"
        );
        assert_eq!(
            export_file_name(range, "xlsx"),
            "sales-report-2024-01-05-2024-02-06.xlsx"
        );
    }
}
