//! `SeaORM` Entity for the products (inventory) table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub purchase_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub sale_price: Decimal,
    pub supplier1: String,
    pub supplier2: Option<String>,
    /// Derived from the product name prefix; gates which affiliates see it.
    pub affiliate_listed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
