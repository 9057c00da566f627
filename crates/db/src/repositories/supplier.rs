//! Supplier repository for database operations.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::suppliers;

/// Supplier repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: DatabaseConnection,
}

impl SupplierRepository {
    /// Creates a new supplier repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<suppliers::Model>, DbErr> {
        suppliers::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists all suppliers in ascending name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<suppliers::Model>, DbErr> {
        suppliers::Entity::find()
            .order_by_asc(suppliers::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds suppliers whose name contains `query`, case-insensitively.
    /// Used by the inventory form's supplier autocomplete.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<suppliers::Model>, DbErr> {
        let pattern = format!("%{}%", query.to_lowercase());
        suppliers::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(suppliers::Column::Name))).like(pattern))
            .order_by_asc(suppliers::Column::Name)
            .all(&self.db)
            .await
    }

    /// Creates a new supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str) -> Result<suppliers::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let model = suppliers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.db).await
    }

    /// Renames an existing supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn rename(
        &self,
        record: suppliers::Model,
        name: &str,
    ) -> Result<suppliers::Model, DbErr> {
        let mut model: suppliers::ActiveModel = record.into();
        model.name = Set(name.to_string());
        model.updated_at = Set(chrono::Utc::now().into());
        model.update(&self.db).await
    }

    /// Deletes a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        suppliers::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "supplier_tests.rs"]
mod tests;
