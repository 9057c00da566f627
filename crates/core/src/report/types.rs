//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tienda_shared::types::SaleId;

use super::error::ReportError;

/// Inclusive date range a report is generated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a validated date range.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the given date falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A sale as fetched from the store, already filtered to the report's range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sale ID.
    pub id: SaleId,
    /// Affiliate credited with the sale.
    pub affiliate: String,
    /// Calendar date of the sale.
    pub date: NaiveDate,
    /// Product name as captured at sale time.
    pub product_name: String,
    /// Purchase (cost) price.
    pub purchase_price: Decimal,
    /// Sale price.
    pub sale_price: Decimal,
}

/// A sale inside a report, with its profit attached.
///
/// Profit is computed exactly once during aggregation and never recomputed
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Sale ID.
    pub id: SaleId,
    /// Calendar date of the sale.
    pub date: NaiveDate,
    /// Product name as captured at sale time.
    pub product_name: String,
    /// Purchase (cost) price.
    pub purchase_price: Decimal,
    /// Sale price.
    pub sale_price: Decimal,
    /// `sale_price - purchase_price`; negative when sold below cost.
    pub profit: Decimal,
}

/// Summed monetary fields over a set of report lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Sum of purchase prices.
    pub purchase_price: Decimal,
    /// Sum of sale prices.
    pub sale_price: Decimal,
    /// Sum of profits.
    pub profit: Decimal,
}

impl ReportTotals {
    /// Adds one line's amounts into the running totals.
    pub fn accumulate(&mut self, line: &ReportLine) {
        self.purchase_price += line.purchase_price;
        self.sale_price += line.sale_price;
        self.profit += line.profit;
    }
}

/// All sales of one affiliate within a report, plus that affiliate's subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateGroup {
    /// Affiliate name the group is keyed by.
    pub affiliate: String,
    /// The affiliate's sales, in input order.
    pub sales: Vec<ReportLine>,
    /// Subtotal over this group's sales only.
    pub totals: ReportTotals,
}

/// The grouped, totaled, ordered result of aggregating sale records.
///
/// Immutable after construction: a new report replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    /// The date range the report was generated over.
    pub range: DateRange,
    /// Groups in display order: reserved affiliate first, then ascending
    /// lexicographic order of affiliate name.
    pub groups: Vec<AffiliateGroup>,
    /// Sum over all records regardless of affiliate.
    pub grand_total: ReportTotals,
}

impl SalesReport {
    /// Total number of sale lines across all groups.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.sales.len()).sum()
    }
}
