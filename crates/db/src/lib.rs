//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - A collection change hub for live snapshot listeners

pub mod changes;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use changes::{ChangeEvent, ChangeHub, ChangeOp, Collection};
pub use repositories::{
    AffiliateRepository, ProductRepository, SaleRepository, SupplierRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
