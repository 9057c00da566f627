//! Reserved-affiliate policy and name ordering.
//!
//! One affiliate name is reserved for the store owner. It always sorts first
//! wherever affiliate names are listed, and it can never be renamed or
//! deleted. Everything that orders affiliate names (listings, autocomplete
//! suggestions, report grouping) must go through [`compare_names`] so the rule
//! lives in exactly one place.

use std::cmp::Ordering;

pub mod error;

pub use error::AffiliateError;

/// The reserved affiliate name representing the store owner.
pub const RESERVED_AFFILIATE: &str = "GODSPLAN";

/// Returns true if the given name is the reserved affiliate.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    name == RESERVED_AFFILIATE
}

/// Sort key for affiliate names: reserved name first, then ascending
/// case-sensitive lexicographic order.
#[must_use]
pub fn ordering_key(name: &str) -> (u8, &str) {
    (u8::from(!is_reserved(name)), name)
}

/// Total order over affiliate names implementing the reserved-first policy.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    ordering_key(a).cmp(&ordering_key(b))
}

/// Validates a submitted affiliate name.
///
/// # Errors
///
/// Returns [`AffiliateError::EmptyName`] if the trimmed name is empty.
pub fn validate_name(name: &str) -> Result<&str, AffiliateError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AffiliateError::EmptyName);
    }
    Ok(trimmed)
}

/// Checks that a mutation (rename or delete) is allowed for this affiliate.
///
/// # Errors
///
/// Returns [`AffiliateError::ReservedImmutable`] for the reserved affiliate.
pub fn check_mutable(name: &str) -> Result<(), AffiliateError> {
    if is_reserved(name) {
        return Err(AffiliateError::ReservedImmutable);
    }
    Ok(())
}
