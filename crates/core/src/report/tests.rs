//! Property-based and example tests for the report module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tienda_shared::types::SaleId;

use crate::affiliate::RESERVED_AFFILIATE;

use super::error::ReportError;
use super::service::ReportService;
use super::types::{DateRange, SaleRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january() -> DateRange {
    DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap()
}

fn record(affiliate: &str, product: &str, purchase: Decimal, sale: Decimal) -> SaleRecord {
    SaleRecord {
        id: SaleId::new(),
        affiliate: affiliate.to_string(),
        date: date(2024, 1, 10),
        product_name: product.to_string(),
        purchase_price: purchase,
        sale_price: sale,
    }
}

fn arb_record() -> impl Strategy<Value = SaleRecord> {
    (
        prop::sample::select(vec![RESERVED_AFFILIATE, "Ana", "Luis", "Zoe", "maria"]),
        0i64..500_000,
        0i64..500_000,
        1u32..29,
        0u32..1000,
    )
        .prop_map(|(affiliate, purchase_cents, sale_cents, day, item)| SaleRecord {
            id: SaleId::new(),
            affiliate: affiliate.to_string(),
            date: date(2024, 1, day),
            product_name: format!("Item {item}"),
            purchase_price: Decimal::new(purchase_cents, 2),
            sale_price: Decimal::new(sale_cents, 2),
        })
}

proptest! {
    /// Every record lands in exactly one group, keyed by its affiliate, with
    /// within-group order preserved.
    #[test]
    fn prop_grouping_partitions_records(records in prop::collection::vec(arb_record(), 1..60)) {
        let report = ReportService::build(january(), records.clone()).unwrap();

        prop_assert_eq!(report.record_count(), records.len());

        for group in &report.groups {
            let expected: Vec<_> = records
                .iter()
                .filter(|r| r.affiliate == group.affiliate)
                .map(|r| r.id)
                .collect();
            let actual: Vec<_> = group.sales.iter().map(|l| l.id).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// Reserved affiliate first when present; all other groups strictly
    /// ascending lexicographically.
    #[test]
    fn prop_group_ordering(records in prop::collection::vec(arb_record(), 1..60)) {
        let report = ReportService::build(january(), records).unwrap();

        let names: Vec<&str> = report.groups.iter().map(|g| g.affiliate.as_str()).collect();
        let rest = if names[0] == RESERVED_AFFILIATE {
            &names[1..]
        } else {
            // Reserved group absent entirely.
            prop_assert!(!names.contains(&RESERVED_AFFILIATE));
            &names[..]
        };
        for pair in rest.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Per-line profit, per-group subtotals, and the grand total are all
    /// consistent sums.
    #[test]
    fn prop_sum_invariants(records in prop::collection::vec(arb_record(), 1..60)) {
        let report = ReportService::build(january(), records).unwrap();

        let mut purchase = Decimal::ZERO;
        let mut sale = Decimal::ZERO;
        let mut profit = Decimal::ZERO;

        for group in &report.groups {
            let mut sub_purchase = Decimal::ZERO;
            let mut sub_sale = Decimal::ZERO;
            let mut sub_profit = Decimal::ZERO;
            for line in &group.sales {
                prop_assert_eq!(line.profit, line.sale_price - line.purchase_price);
                sub_purchase += line.purchase_price;
                sub_sale += line.sale_price;
                sub_profit += line.profit;
            }
            prop_assert_eq!(group.totals.purchase_price, sub_purchase);
            prop_assert_eq!(group.totals.sale_price, sub_sale);
            prop_assert_eq!(group.totals.profit, sub_profit);

            purchase += group.totals.purchase_price;
            sale += group.totals.sale_price;
            profit += group.totals.profit;
        }

        prop_assert_eq!(report.grand_total.purchase_price, purchase);
        prop_assert_eq!(report.grand_total.sale_price, sale);
        prop_assert_eq!(report.grand_total.profit, profit);
    }

    /// Building twice from the same input yields structurally identical output.
    #[test]
    fn prop_idempotent(records in prop::collection::vec(arb_record(), 1..40)) {
        let a = ReportService::build(january(), records.clone()).unwrap();
        let b = ReportService::build(january(), records).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn test_empty_input_is_terminal() {
    let result = ReportService::build(january(), Vec::new());
    assert_eq!(result.unwrap_err(), ReportError::NoRecords);
}

#[test]
fn test_invalid_date_range_rejected() {
    let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, ReportError::InvalidDateRange { .. }));
}

#[test]
fn test_profit_can_be_negative_or_zero() {
    let records = vec![
        record("Ana", "Gadget", dec!(20), dec!(18)),
        record("Ana", "Trinket", dec!(5), dec!(5)),
    ];
    let report = ReportService::build(january(), records).unwrap();
    let lines = &report.groups[0].sales;
    assert_eq!(lines[0].profit, dec!(-2));
    assert_eq!(lines[1].profit, dec!(0));
}

/// The worked example: reserved group first, Ana second, with the exact
/// subtotal and grand-total figures.
#[test]
fn test_reference_scenario() {
    let records = vec![
        record(RESERVED_AFFILIATE, "Widget", dec!(10), dec!(15)),
        record("Ana", "Gadget", dec!(20), dec!(18)),
    ];
    let range = DateRange::new(date(2024, 1, 5), date(2024, 1, 6)).unwrap();
    let report = ReportService::build(range, records).unwrap();

    let names: Vec<&str> = report.groups.iter().map(|g| g.affiliate.as_str()).collect();
    assert_eq!(names, vec![RESERVED_AFFILIATE, "Ana"]);

    let reserved = &report.groups[0].totals;
    assert_eq!(reserved.purchase_price, dec!(10));
    assert_eq!(reserved.sale_price, dec!(15));
    assert_eq!(reserved.profit, dec!(5));

    let ana = &report.groups[1].totals;
    assert_eq!(ana.purchase_price, dec!(20));
    assert_eq!(ana.sale_price, dec!(18));
    assert_eq!(ana.profit, dec!(-2));

    assert_eq!(report.grand_total.purchase_price, dec!(30));
    assert_eq!(report.grand_total.sale_price, dec!(33));
    assert_eq!(report.grand_total.profit, dec!(3));
}

#[test]
fn test_reserved_group_first_regardless_of_input_order() {
    let records = vec![
        record("Zoe", "A", dec!(1), dec!(2)),
        record("Ana", "B", dec!(1), dec!(2)),
        record(RESERVED_AFFILIATE, "C", dec!(1), dec!(2)),
    ];
    let report = ReportService::build(january(), records).unwrap();
    assert_eq!(report.groups[0].affiliate, RESERVED_AFFILIATE);
    assert_eq!(report.groups[1].affiliate, "Ana");
    assert_eq!(report.groups[2].affiliate, "Zoe");
}

#[test]
fn test_date_range_contains() {
    let range = january();
    assert!(range.contains(date(2024, 1, 1)));
    assert!(range.contains(date(2024, 1, 31)));
    assert!(!range.contains(date(2024, 2, 1)));
    assert!(!range.contains(date(2023, 12, 31)));
}
