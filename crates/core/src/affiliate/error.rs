//! Affiliate error types.

use thiserror::Error;

/// Errors raised by affiliate business rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AffiliateError {
    /// Affiliate name is empty after trimming.
    #[error("Affiliate name must not be empty")]
    EmptyName,

    /// The reserved affiliate cannot be renamed or deleted.
    #[error("The reserved affiliate cannot be modified")]
    ReservedImmutable,

    /// Another affiliate already uses this name.
    #[error("An affiliate named '{0}' already exists")]
    DuplicateName(String),

    /// The affiliate still has sales recorded against it.
    #[error("Affiliate '{0}' has recorded sales and cannot be deleted")]
    HasSales(String),
}
