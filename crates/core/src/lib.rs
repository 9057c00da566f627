//! Core business logic for Tienda.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `affiliate` - Reserved-affiliate policy and name ordering
//! - `catalog` - Product classification and price rules
//! - `report` - Sales report aggregation over a date range
//! - `export` - PDF and XLSX renderings of a sales report

pub mod affiliate;
pub mod catalog;
pub mod export;
pub mod report;
