//! Affiliate repository for database operations.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use tienda_core::affiliate;

use crate::entities::affiliates;

/// Affiliate repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AffiliateRepository {
    db: DatabaseConnection,
}

impl AffiliateRepository {
    /// Creates a new affiliate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an affiliate by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<affiliates::Model>, DbErr> {
        affiliates::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists all affiliates in display order: reserved name first, then
    /// ascending lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<affiliates::Model>, DbErr> {
        let mut rows = affiliates::Entity::find().all(&self.db).await?;
        rows.sort_by(|a, b| affiliate::compare_names(&a.name, &b.name));
        Ok(rows)
    }

    /// Finds affiliates whose name starts with `prefix`, in display order.
    /// Used by the sale-capture autocomplete.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search_prefix(&self, prefix: &str) -> Result<Vec<affiliates::Model>, DbErr> {
        let mut rows = affiliates::Entity::find()
            .filter(affiliates::Column::Name.starts_with(prefix))
            .all(&self.db)
            .await?;
        rows.sort_by(|a, b| affiliate::compare_names(&a.name, &b.name));
        Ok(rows)
    }

    /// Checks whether a name is already taken, case-insensitively, optionally
    /// excluding one record (for renames). Matches on `lower(name)`, which the
    /// unique index on `affiliates` covers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query = affiliates::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(affiliates::Column::Name))).eq(name.to_lowercase()),
        );
        if let Some(id) = exclude {
            query = query.filter(affiliates::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await?;
        Ok(count > 0)
    }

    /// Creates a new affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str) -> Result<affiliates::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let model = affiliates::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.db).await
    }

    /// Renames an existing affiliate.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn rename(
        &self,
        record: affiliates::Model,
        name: &str,
    ) -> Result<affiliates::Model, DbErr> {
        let mut model: affiliates::ActiveModel = record.into();
        model.name = Set(name.to_string());
        model.updated_at = Set(chrono::Utc::now().into());
        model.update(&self.db).await
    }

    /// Deletes an affiliate by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        affiliates::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "affiliate_tests.rs"]
mod tests;
