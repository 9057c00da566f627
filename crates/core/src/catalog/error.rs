//! Catalog error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by product catalog rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A price is negative.
    #[error("Prices must not be negative")]
    NegativePrice,

    /// Sale price must be strictly greater than purchase price.
    #[error("Sale price {sale} must be greater than purchase price {purchase}")]
    SaleNotAboveCost {
        /// Purchase price submitted.
        purchase: Decimal,
        /// Sale price submitted.
        sale: Decimal,
    },

    /// A required field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
