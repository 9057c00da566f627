//! Sale repository. Sale rows denormalize the product name and prices at
//! capture time so later catalog edits never rewrite history.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sales;

/// Fields captured when a sale is recorded.
#[derive(Debug, Clone)]
pub struct SaleInput {
    /// Affiliate the sale belongs to.
    pub affiliate: String,
    /// Business date of the sale.
    pub sale_date: NaiveDate,
    /// Product the sale was captured from.
    pub product_id: Uuid,
    /// Product name frozen at capture time.
    pub product_name: String,
    /// Purchase price frozen at capture time.
    pub purchase_price: Decimal,
    /// Sale price frozen at capture time.
    pub sale_price: Decimal,
}

/// Sale repository for capture and range queries.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: SaleInput) -> Result<sales::Model, DbErr> {
        let model = sales::ActiveModel {
            id: Set(Uuid::new_v4()),
            affiliate: Set(input.affiliate),
            sale_date: Set(input.sale_date),
            product_id: Set(input.product_id),
            product_name: Set(input.product_name),
            purchase_price: Set(input.purchase_price),
            sale_price: Set(input.sale_price),
            created_at: Set(chrono::Utc::now().into()),
        };
        model.insert(&self.db).await
    }

    /// Lists all sales in capture order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<sales::Model>, DbErr> {
        sales::Entity::find()
            .order_by_asc(sales::Column::SaleDate)
            .order_by_asc(sales::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds sales inside an inclusive date window, ordered by sale date then
    /// capture time so reports group deterministically. Either bound may be
    /// open.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_in_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<sales::Model>, DbErr> {
        let mut query = sales::Entity::find();
        if let Some(start) = start {
            query = query.filter(sales::Column::SaleDate.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(sales::Column::SaleDate.lte(end));
        }
        query
            .order_by_asc(sales::Column::SaleDate)
            .order_by_asc(sales::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Returns true if any sale belongs to the given affiliate. Blocks
    /// affiliate deletion so history stays attributable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists_for_affiliate(&self, affiliate: &str) -> Result<bool, DbErr> {
        let count = sales::Entity::find()
            .filter(sales::Column::Affiliate.eq(affiliate))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
