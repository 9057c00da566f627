//! Product (inventory) repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use tienda_core::catalog;

use crate::entities::products;

/// Fields accepted when creating or updating a product. The
/// `affiliate_listed` flag is always derived from the name, never submitted.
#[derive(Debug, Clone)]
pub struct ProductInput {
    /// Product name; an `AF-` prefix lists it for regular affiliates.
    pub name: String,
    /// Purchase (cost) price.
    pub purchase_price: Decimal,
    /// Sale price.
    pub sale_price: Decimal,
    /// Primary supplier name.
    pub supplier1: String,
    /// Optional secondary supplier name.
    pub supplier2: Option<String>,
}

/// Product repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<products::Model>, DbErr> {
        products::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists all products in ascending name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<products::Model>, DbErr> {
        products::Entity::find()
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await
    }

    /// Lists products by their affiliate-listing flag: `true` returns the
    /// `AF-` catalog shown to regular affiliates, `false` the owner's catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_listing(&self, affiliate_listed: bool) -> Result<Vec<products::Model>, DbErr> {
        products::Entity::find()
            .filter(products::Column::AffiliateListed.eq(affiliate_listed))
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await
    }

    /// Returns true if any product references the supplier name in either
    /// supplier field. Blocks supplier deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn references_supplier(&self, supplier_name: &str) -> Result<bool, DbErr> {
        let count = products::Entity::find()
            .filter(
                products::Column::Supplier1
                    .eq(supplier_name)
                    .or(products::Column::Supplier2.eq(supplier_name)),
            )
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Creates a new product, deriving its listing flag from the name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: ProductInput) -> Result<products::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let model = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            affiliate_listed: Set(catalog::is_affiliate_listed(&input.name)),
            name: Set(input.name),
            purchase_price: Set(input.purchase_price),
            sale_price: Set(input.sale_price),
            supplier1: Set(input.supplier1),
            supplier2: Set(input.supplier2),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.db).await
    }

    /// Updates a product in place, re-deriving its listing flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        record: products::Model,
        input: ProductInput,
    ) -> Result<products::Model, DbErr> {
        let mut model: products::ActiveModel = record.into();
        model.affiliate_listed = Set(catalog::is_affiliate_listed(&input.name));
        model.name = Set(input.name);
        model.purchase_price = Set(input.purchase_price);
        model.sale_price = Set(input.sale_price);
        model.supplier1 = Set(input.supplier1);
        model.supplier2 = Set(input.supplier2);
        model.updated_at = Set(chrono::Utc::now().into());
        model.update(&self.db).await
    }

    /// Deletes a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        products::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
