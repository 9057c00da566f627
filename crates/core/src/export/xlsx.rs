//! Flat spreadsheet rendering of a sales report.
//!
//! One sheet, no pagination. The row grid mirrors the PDF export's semantic
//! content exactly: title, period, then per group a name row, a header row,
//! the sale rows, a subtotal row and a blank separator, and finally one
//! grand-total row. Monetary cells carry raw numeric values, not formatted
//! strings, so downstream spreadsheet formulas work on them directly.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::report::{ReportTotals, SalesReport};

use super::ExportError;

/// Sheet name used for the single worksheet.
const SHEET_NAME: &str = "Sales Report";

/// One cell of the export grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A text cell.
    Text(String),
    /// A raw numeric cell.
    Number(Decimal),
}

/// Builds the exact row grid the sheet will contain. Exposed separately from
/// the writer so the row sequence and blank-row placement are testable
/// without parsing the container format.
#[must_use]
pub fn sheet_rows(report: &SalesReport) -> Vec<Vec<Cell>> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    rows.push(vec![text("Sales Report")]);
    rows.push(vec![text(&format!(
        "Period: {} - {}",
        report.range.start.format("%d/%m/%Y"),
        report.range.end.format("%d/%m/%Y")
    ))]);
    rows.push(Vec::new());

    for group in &report.groups {
        rows.push(vec![text(&group.affiliate)]);
        rows.push(vec![
            text("Product"),
            text("Date"),
            text("Purchase Price"),
            text("Sale Price"),
            text("Profit"),
        ]);

        for line in &group.sales {
            rows.push(vec![
                text(&line.product_name),
                text(&line.date.format("%d/%m/%Y").to_string()),
                Cell::Number(line.purchase_price),
                Cell::Number(line.sale_price),
                Cell::Number(line.profit),
            ]);
        }

        rows.push(totals_row(
            &format!("Subtotal {}", group.affiliate),
            group.totals,
        ));
        rows.push(Vec::new());
    }

    rows.push(totals_row("GRAND TOTAL", report.grand_total));
    rows
}

/// Renders a report as a single-sheet XLSX workbook.
///
/// # Errors
///
/// Returns [`ExportError::Workbook`] if the spreadsheet writer fails.
pub fn export_xlsx(report: &SalesReport) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();

    for (row_idx, row) in sheet_rows(report).iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let excel_row = row_idx as u32;
        // Single-cell rows are titles, group names, or the period line.
        let emphasized = row.len() == 1 || is_totals_row(row);

        for (col_idx, cell) in row.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let excel_col = col_idx as u16;
            match cell {
                Cell::Text(value) if emphasized => {
                    worksheet.write_string_with_format(excel_row, excel_col, value, &bold)?;
                }
                Cell::Text(value) => {
                    worksheet.write_string(excel_row, excel_col, value)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(
                        excel_row,
                        excel_col,
                        value.to_f64().unwrap_or_default(),
                    )?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

fn totals_row(label: &str, totals: ReportTotals) -> Vec<Cell> {
    vec![
        text(label),
        text(""),
        Cell::Number(totals.purchase_price),
        Cell::Number(totals.sale_price),
        Cell::Number(totals.profit),
    ]
}

fn is_totals_row(row: &[Cell]) -> bool {
    matches!(row.first(), Some(Cell::Text(label)) if label.starts_with("Subtotal ") || label == "GRAND TOTAL")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliate::RESERVED_AFFILIATE;
    use crate::report::{DateRange, ReportService, SaleRecord};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tienda_shared::types::SaleId;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn record(affiliate: &str, product: &str, purchase: Decimal, sale: Decimal) -> SaleRecord {
        SaleRecord {
            id: SaleId::new(),
            affiliate: affiliate.to_string(),
            date: date(5),
            product_name: product.to_string(),
            purchase_price: purchase,
            sale_price: sale,
        }
    }

    fn sample_report() -> SalesReport {
        let range = DateRange::new(date(5), date(6)).unwrap();
        ReportService::build(
            range,
            vec![
                record(RESERVED_AFFILIATE, "Widget", dec!(10), dec!(15)),
                record("Ana", "Gadget", dec!(20), dec!(18)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_row_sequence_matches_contract() {
        let rows = sheet_rows(&sample_report());

        assert_eq!(rows[0], vec![text("Sales Report")]);
        assert_eq!(rows[1], vec![text("Period: 05/01/2024 - 06/01/2024")]);
        assert!(rows[2].is_empty());

        // Reserved affiliate group first.
        assert_eq!(rows[3], vec![text(RESERVED_AFFILIATE)]);
        assert_eq!(rows[4][0], text("Product"));
        assert_eq!(rows[4][4], text("Profit"));
        assert_eq!(rows[5][0], text("Widget"));
        assert_eq!(rows[5][2], Cell::Number(dec!(10)));
        assert_eq!(rows[5][3], Cell::Number(dec!(15)));
        assert_eq!(rows[5][4], Cell::Number(dec!(5)));
        assert_eq!(rows[6][0], text("Subtotal GODSPLAN"));
        assert!(rows[7].is_empty());

        // Then Ana's group.
        assert_eq!(rows[8], vec![text("Ana")]);
        assert_eq!(rows[10][4], Cell::Number(dec!(-2)));
        assert_eq!(rows[11][0], text("Subtotal Ana"));
        assert!(rows[12].is_empty());

        // Grand total last.
        let last = rows.last().unwrap();
        assert_eq!(last[0], text("GRAND TOTAL"));
        assert_eq!(last[2], Cell::Number(dec!(30)));
        assert_eq!(last[3], Cell::Number(dec!(33)));
        assert_eq!(last[4], Cell::Number(dec!(3)));
        assert_eq!(rows.len(), 14);
    }

    #[test]
    fn test_monetary_cells_are_raw_numbers() {
        let rows = sheet_rows(&sample_report());
        for row in &rows {
            for cell in row {
                if let Cell::Text(value) = cell {
                    assert!(
                        !value.starts_with('$'),
                        "monetary values must not be display-formatted: {value}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_product_name_not_truncated_in_sheet() {
        let range = DateRange::new(date(5), date(6)).unwrap();
        let long_name = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let report =
            ReportService::build(range, vec![record("Ana", long_name, dec!(1), dec!(2))]).unwrap();
        let rows = sheet_rows(&report);
        assert_eq!(rows[5][0], text(long_name));
    }

    #[test]
    fn test_workbook_bytes() {
        let bytes = export_xlsx(&sample_report()).unwrap();
        // XLSX is a zip container.
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    /// Both exporters consume the same structure; the sheet grid carries the
    /// same (product, date, purchase, sale, profit) tuples and totals the
    /// report itself does.
    #[test]
    fn test_grid_matches_report_content() {
        let report = sample_report();
        let rows = sheet_rows(&report);

        for group in &report.groups {
            for line in &group.sales {
                assert!(rows.iter().any(|row| {
                    row.first() == Some(&text(&line.product_name))
                        && row.get(4) == Some(&Cell::Number(line.profit))
                }));
            }
        }
    }
}
