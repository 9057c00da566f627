//! Initial schema: affiliates, suppliers, products, sales.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS sales CASCADE;
             DROP TABLE IF EXISTS products CASCADE;
             DROP TABLE IF EXISTS suppliers CASCADE;
             DROP TABLE IF EXISTS affiliates CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Affiliates: sellers credited with sales. One name is reserved for the
-- store owner and is seeded by the seeder binary.
CREATE TABLE affiliates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(120) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Names are unique case-insensitively
CREATE UNIQUE INDEX idx_affiliates_name_ci ON affiliates (lower(name));

CREATE TABLE suppliers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(120) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_suppliers_name ON suppliers (name);

CREATE TABLE products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(200) NOT NULL,
    purchase_price NUMERIC(12, 2) NOT NULL CHECK (purchase_price >= 0),
    sale_price NUMERIC(12, 2) NOT NULL CHECK (sale_price >= 0),
    supplier1 VARCHAR(120) NOT NULL,
    supplier2 VARCHAR(120),
    affiliate_listed BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Per-affiliate product listing filters on this flag
CREATE INDEX idx_products_listed ON products (affiliate_listed);

-- Sales denormalize the product name and prices at capture time; no FK to
-- products so history survives product edits and deletions.
CREATE TABLE sales (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    affiliate VARCHAR(120) NOT NULL,
    sale_date DATE NOT NULL,
    product_id UUID NOT NULL,
    product_name VARCHAR(200) NOT NULL,
    purchase_price NUMERIC(12, 2) NOT NULL CHECK (purchase_price >= 0),
    sale_price NUMERIC(12, 2) NOT NULL CHECK (sale_price >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Report queries fetch by inclusive date range
CREATE INDEX idx_sales_date ON sales (sale_date, created_at);

-- Affiliate deletion checks for recorded sales
CREATE INDEX idx_sales_affiliate ON sales (affiliate);
";
