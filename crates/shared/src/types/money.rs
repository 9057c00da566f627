//! Currency display formatting with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary amounts in the system are `rust_decimal::Decimal`; the store
//! operates in a single currency (USD), so formatting is the only concern here.

use rust_decimal::Decimal;

/// Formats a decimal amount as a USD currency string, e.g. `$1,234.50`.
///
/// Negative amounts render with a leading minus sign: `-$12.00`.
/// The amount is rounded to two decimal places using banker's rounding.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).abs();
    let text = format!("{rounded:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${int_grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "$0.00")]
    #[case(dec!(5), "$5.00")]
    #[case(dec!(19.9), "$19.90")]
    #[case(dec!(999), "$999.00")]
    #[case(dec!(1000), "$1,000.00")]
    #[case(dec!(1234.5), "$1,234.50")]
    #[case(dec!(1234567.89), "$1,234,567.89")]
    fn test_format(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_usd(amount), expected);
    }

    #[rstest]
    #[case(dec!(-2.5), "-$2.50")]
    #[case(dec!(-1234), "-$1,234.00")]
    fn test_format_negative(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_usd(amount), expected);
    }

    #[test]
    fn test_format_rounds_to_cents() {
        assert_eq!(format_usd(dec!(10.005)), "$10.00");
        assert_eq!(format_usd(dec!(10.015)), "$10.02");
    }
}
