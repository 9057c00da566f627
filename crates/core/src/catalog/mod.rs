//! Product classification and price rules.
//!
//! Products whose name carries the `AF-` prefix are listed to regular
//! affiliates; everything else is visible only to the reserved affiliate.
//! The flag is derived from the name on every write, never stored by hand.

pub mod error;

pub use error::CatalogError;

use rust_decimal::Decimal;

use crate::affiliate;

/// Name prefix marking a product as listed for regular affiliates.
pub const AFFILIATE_PREFIX: &str = "AF-";

/// Returns true if a product with this name is listed for regular affiliates.
#[must_use]
pub fn is_affiliate_listed(product_name: &str) -> bool {
    product_name.starts_with(AFFILIATE_PREFIX)
}

/// Returns true if the named seller may sell a product with the given listing
/// flag: the reserved affiliate sells only unlisted products, everyone else
/// only listed ones.
#[must_use]
pub fn visible_to(affiliate_name: &str, affiliate_listed: bool) -> bool {
    if affiliate::is_reserved(affiliate_name) {
        !affiliate_listed
    } else {
        affiliate_listed
    }
}

/// Validates the purchase/sale price pair of a product.
///
/// # Errors
///
/// Returns [`CatalogError::NegativePrice`] for negative amounts and
/// [`CatalogError::SaleNotAboveCost`] when the sale price does not exceed
/// the purchase price.
pub fn validate_prices(purchase_price: Decimal, sale_price: Decimal) -> Result<(), CatalogError> {
    if purchase_price.is_sign_negative() || sale_price.is_sign_negative() {
        return Err(CatalogError::NegativePrice);
    }
    if sale_price <= purchase_price {
        return Err(CatalogError::SaleNotAboveCost {
            purchase: purchase_price,
            sale: sale_price,
        });
    }
    Ok(())
}

/// Validates a full product submission: required fields plus the price rule.
///
/// # Errors
///
/// Returns [`CatalogError::MissingField`] for an empty name or primary
/// supplier, or a price error from [`validate_prices`].
pub fn validate_product(
    name: &str,
    purchase_price: Decimal,
    sale_price: Decimal,
    supplier1: &str,
) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::MissingField("name"));
    }
    if supplier1.trim().is_empty() {
        return Err(CatalogError::MissingField("supplier1"));
    }
    validate_prices(purchase_price, sale_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliate::RESERVED_AFFILIATE;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("AF-Widget", true)]
    #[case("AF-", true)]
    #[case("Widget", false)]
    #[case("af-widget", false)]
    #[case("XAF-Widget", false)]
    fn test_prefix_classification(#[case] name: &str, #[case] listed: bool) {
        assert_eq!(is_affiliate_listed(name), listed);
    }

    #[test]
    fn test_reserved_sees_only_unlisted() {
        assert!(visible_to(RESERVED_AFFILIATE, false));
        assert!(!visible_to(RESERVED_AFFILIATE, true));
    }

    #[test]
    fn test_regular_affiliate_sees_only_listed() {
        assert!(visible_to("Ana", true));
        assert!(!visible_to("Ana", false));
    }

    #[test]
    fn test_sale_must_exceed_purchase() {
        assert!(validate_prices(dec!(10), dec!(15)).is_ok());
        assert!(matches!(
            validate_prices(dec!(10), dec!(10)),
            Err(CatalogError::SaleNotAboveCost { .. })
        ));
        assert!(matches!(
            validate_prices(dec!(10), dec!(9.99)),
            Err(CatalogError::SaleNotAboveCost { .. })
        ));
    }

    #[test]
    fn test_product_requires_name_and_supplier() {
        assert!(matches!(
            validate_product("", dec!(1), dec!(2), "Acme"),
            Err(CatalogError::MissingField("name"))
        ));
        assert!(matches!(
            validate_product("Widget", dec!(1), dec!(2), "  "),
            Err(CatalogError::MissingField("supplier1"))
        ));
        assert!(validate_product("Widget", dec!(1), dec!(2), "Acme").is_ok());
    }

    #[test]
    fn test_negative_prices_rejected() {
        assert!(matches!(
            validate_prices(dec!(-1), dec!(5)),
            Err(CatalogError::NegativePrice)
        ));
        assert!(matches!(
            validate_prices(dec!(1), dec!(-5)),
            Err(CatalogError::NegativePrice)
        ));
    }
}
