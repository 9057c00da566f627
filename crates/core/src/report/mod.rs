//! Sales report aggregation.
//!
//! This module provides pure business logic for turning a date-range query
//! result into a renderable report: per-affiliate groups with subtotals, a
//! grand total, and the reserved-first group ordering. Rendering to PDF or
//! XLSX lives in [`crate::export`].

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
