//! `SeaORM` entity definitions.

pub mod affiliates;
pub mod products;
pub mod sales;
pub mod suppliers;
