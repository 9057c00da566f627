//! Paginated PDF rendering of a sales report.
//!
//! Builds a minimal but valid PDF 1.4 file by hand: landscape A4 pages,
//! built-in Helvetica fonts, uncompressed content streams. A vertical cursor
//! tracks the write position; a page break happens before any row that would
//! cross the bottom margin, so a row's fields never split across pages.

// Floating point here is page geometry in points, not money.
#![allow(clippy::float_arithmetic)]

use tienda_shared::types::format_usd;

use crate::report::{AffiliateGroup, DateRange, ReportTotals, SalesReport};

/// A4 landscape width in points.
const PAGE_WIDTH: f64 = 842.0;
/// A4 landscape height in points.
const PAGE_HEIGHT: f64 = 595.0;
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 40.0;
const CONTENT_TOP: f64 = PAGE_HEIGHT - 40.0;
const COLUMN_WIDTH: f64 = 150.0;
const ROW_HEIGHT: f64 = 14.0;

/// Product names are truncated to this many characters for display only;
/// the stored value is never altered.
const NAME_DISPLAY_CHARS: usize = 20;

/// Renders a report as a single landscape PDF document.
///
/// Pure over the report: the same input always produces the same bytes.
#[must_use]
pub fn export_pdf(report: &SalesReport) -> Vec<u8> {
    let mut doc = PageComposer::new();

    doc.text(Font::Bold, 16.0, MARGIN_LEFT, "Sales Report");
    doc.advance(22.0);
    doc.text(Font::Regular, 11.0, MARGIN_LEFT, &period_line(report.range));
    doc.advance(26.0);

    for group in &report.groups {
        write_group(&mut doc, group);
    }

    doc.ensure_room(ROW_HEIGHT);
    doc.row(Font::Bold, &totals_row("GRAND TOTAL", report.grand_total));

    build_document(doc.finish(), "Sales Report")
}

fn write_group(doc: &mut PageComposer, group: &AffiliateGroup) {
    // Keep the affiliate header and its column captions together.
    doc.ensure_room(16.0 + 2.0 * ROW_HEIGHT);
    doc.text(Font::Bold, 11.0, MARGIN_LEFT, &group.affiliate);
    doc.advance(16.0);
    doc.row(
        Font::Bold,
        &[
            "Product".to_string(),
            "Date".to_string(),
            "Purchase Price".to_string(),
            "Sale Price".to_string(),
            "Profit".to_string(),
        ],
    );

    for line in &group.sales {
        doc.ensure_room(ROW_HEIGHT);
        doc.row(
            Font::Regular,
            &[
                line.product_name.chars().take(NAME_DISPLAY_CHARS).collect(),
                line.date.format("%d/%m/%Y").to_string(),
                format_usd(line.purchase_price),
                format_usd(line.sale_price),
                format_usd(line.profit),
            ],
        );
    }

    doc.ensure_room(ROW_HEIGHT);
    doc.row(
        Font::Bold,
        &totals_row(&format!("Subtotal {}", group.affiliate), group.totals),
    );
    doc.advance(6.0);
}

fn totals_row(label: &str, totals: ReportTotals) -> [String; 5] {
    [
        label.to_string(),
        String::new(),
        format_usd(totals.purchase_price),
        format_usd(totals.sale_price),
        format_usd(totals.profit),
    ]
}

fn period_line(range: DateRange) -> String {
    format!(
        "Period: {} - {}",
        range.start.format("%d/%m/%Y"),
        range.end.format("%d/%m/%Y")
    )
}

#[derive(Clone, Copy)]
enum Font {
    Bold,
    Regular,
}

impl Font {
    const fn resource(self) -> &'static str {
        match self {
            Self::Bold => "/F1",
            Self::Regular => "/F2",
        }
    }
}

/// Accumulates content streams page by page, tracking the vertical cursor.
struct PageComposer {
    pages: Vec<String>,
    current: String,
    y: f64,
}

impl PageComposer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            y: CONTENT_TOP,
        }
    }

    /// Starts a new page if `needed` points of vertical space are not left.
    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < MARGIN_BOTTOM {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = CONTENT_TOP;
        }
    }

    fn text(&mut self, font: Font, size: f64, x: f64, text: &str) {
        self.current.push_str("BT\n");
        self.current
            .push_str(&format!("{} {size} Tf\n", font.resource()));
        self.current.push_str(&format!("{x:.1} {:.1} Td\n", self.y));
        self.current
            .push_str(&format!("({}) Tj\n", escape_text(text)));
        self.current.push_str("ET\n");
    }

    /// Writes one table row, all fields at the current cursor, then advances.
    /// Empty cells are skipped (used by totals rows to leave the date column
    /// blank).
    fn row(&mut self, font: Font, cells: &[String; 5]) {
        for (i, cell) in cells.iter().enumerate() {
            if !cell.is_empty() {
                #[allow(clippy::cast_precision_loss)]
                let x = MARGIN_LEFT + i as f64 * COLUMN_WIDTH;
                self.text(font, 10.0, x, cell);
            }
        }
        self.advance(ROW_HEIGHT);
    }

    fn advance(&mut self, dy: f64) {
        self.y -= dy;
    }

    fn finish(mut self) -> Vec<String> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Escape special characters for PDF string literals.
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Assembles the final file: catalog, page tree, one (page, content) object
/// pair per page, the two font objects, the info dictionary, and the xref
/// table.
fn build_document(pages: Vec<String>, title: &str) -> Vec<u8> {
    let page_count = pages.len();
    let bold_obj = 3 + 2 * page_count;
    let regular_obj = bold_obj + 1;
    let info_obj = bold_obj + 2;

    let mut pdf = String::new();
    let mut offsets: Vec<usize> = Vec::new();

    pdf.push_str("%PDF-1.4\n");

    offsets.push(pdf.len());
    pdf.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();
    offsets.push(pdf.len());
    pdf.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {page_count} >>\nendobj\n",
        kids.join(" ")
    ));

    for (i, content) in pages.iter().enumerate() {
        let page_obj = 3 + 2 * i;
        let content_obj = page_obj + 1;

        offsets.push(pdf.len());
        pdf.push_str(&format!(
            "{page_obj} 0 obj\n<< /Type /Page /Parent 2 0 R \
             /MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] \
             /Contents {content_obj} 0 R \
             /Resources << /Font << /F1 {bold_obj} 0 R /F2 {regular_obj} 0 R >> >> >>\nendobj\n"
        ));

        offsets.push(pdf.len());
        pdf.push_str(&format!(
            "{content_obj} 0 obj\n<< /Length {} >>\nstream\n{content}\nendstream\nendobj\n",
            content.len()
        ));
    }

    offsets.push(pdf.len());
    pdf.push_str(&format!(
        "{bold_obj} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>\nendobj\n"
    ));
    offsets.push(pdf.len());
    pdf.push_str(&format!(
        "{regular_obj} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n"
    ));
    offsets.push(pdf.len());
    pdf.push_str(&format!(
        "{info_obj} 0 obj\n<< /Title ({}) /Producer (Tienda) >>\nendobj\n",
        escape_text(title)
    ));

    let xref_offset = pdf.len();
    let num_objects = offsets.len() + 1; // +1 for the free entry
    pdf.push_str(&format!("xref\n0 {num_objects}\n"));
    pdf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {num_objects} /Root 1 0 R /Info {info_obj} 0 R >>\n"
    ));
    pdf.push_str(&format!("startxref\n{xref_offset}\n%%EOF\n"));

    pdf.into_bytes()
}
