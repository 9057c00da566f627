//! Report generation service.

use std::collections::HashMap;

use crate::affiliate;

use super::error::ReportError;
use super::types::{AffiliateGroup, DateRange, ReportLine, ReportTotals, SaleRecord, SalesReport};

/// Service for aggregating sale records into a sales report.
pub struct ReportService;

impl ReportService {
    /// Builds a sales report from records already filtered to `range`.
    ///
    /// Records are partitioned by affiliate with each record's relative order
    /// preserved inside its group. Profit is attached per record, subtotals
    /// are summed per group, and the grand total over all records. Groups are
    /// ordered reserved-affiliate-first, then lexicographically. The result
    /// is fully determined by the input sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoRecords`] for an empty input: zero matching
    /// sales is a terminal state, not an empty report.
    pub fn build(range: DateRange, records: Vec<SaleRecord>) -> Result<SalesReport, ReportError> {
        if records.is_empty() {
            return Err(ReportError::NoRecords);
        }

        let mut groups: Vec<AffiliateGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut grand_total = ReportTotals::default();

        for record in records {
            let SaleRecord {
                id,
                affiliate,
                date,
                product_name,
                purchase_price,
                sale_price,
            } = record;

            let line = ReportLine {
                id,
                date,
                product_name,
                purchase_price,
                sale_price,
                profit: sale_price - purchase_price,
            };

            let slot = match index.get(&affiliate) {
                Some(&i) => i,
                None => {
                    let i = groups.len();
                    index.insert(affiliate.clone(), i);
                    groups.push(AffiliateGroup {
                        affiliate,
                        sales: Vec::new(),
                        totals: ReportTotals::default(),
                    });
                    i
                }
            };

            let group = &mut groups[slot];
            group.totals.accumulate(&line);
            grand_total.accumulate(&line);
            group.sales.push(line);
        }

        // Stable sort keeps the result deterministic for identical input.
        groups.sort_by(|a, b| affiliate::compare_names(&a.affiliate, &b.affiliate));

        Ok(SalesReport {
            range,
            groups,
            grand_total,
        })
    }
}
