//! Database seeder for Tienda development and testing.
//!
//! Seeds the reserved owner affiliate plus sample suppliers and products
//! for local development. The reserved affiliate is required in every
//! environment; the samples only exist to make a fresh checkout usable.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use tienda_core::affiliate::RESERVED_AFFILIATE;
use tienda_core::catalog;
use tienda_db::entities::{affiliates, products, suppliers};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = tienda_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding reserved affiliate...");
    seed_affiliate(&db, RESERVED_AFFILIATE).await;

    println!("Seeding sample affiliate...");
    seed_affiliate(&db, "Ana").await;

    println!("Seeding sample suppliers...");
    seed_supplier(&db, "Acme Wholesale").await;
    seed_supplier(&db, "Global Parts").await;

    println!("Seeding sample products...");
    seed_product(&db, "Widget", "5.00", "8.50", "Acme Wholesale", None).await;
    seed_product(
        &db,
        "AF-Widget",
        "5.00",
        "9.00",
        "Acme Wholesale",
        Some("Global Parts"),
    )
    .await;

    println!("Seeding complete!");
}

async fn seed_affiliate(db: &DatabaseConnection, name: &str) {
    let existing = affiliates::Entity::find()
        .filter(affiliates::Column::Name.eq(name))
        .one(db)
        .await
        .expect("Failed to query affiliates");
    if existing.is_some() {
        println!("  Affiliate '{name}' already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let model = affiliates::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(db).await.expect("Failed to insert affiliate");
}

async fn seed_supplier(db: &DatabaseConnection, name: &str) {
    let existing = suppliers::Entity::find()
        .filter(suppliers::Column::Name.eq(name))
        .one(db)
        .await
        .expect("Failed to query suppliers");
    if existing.is_some() {
        println!("  Supplier '{name}' already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let model = suppliers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(db).await.expect("Failed to insert supplier");
}

async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    purchase: &str,
    sale: &str,
    supplier1: &str,
    supplier2: Option<&str>,
) {
    let existing = products::Entity::find()
        .filter(products::Column::Name.eq(name))
        .one(db)
        .await
        .expect("Failed to query products");
    if existing.is_some() {
        println!("  Product '{name}' already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let model = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        purchase_price: Set(purchase.parse::<Decimal>().expect("bad purchase price")),
        sale_price: Set(sale.parse::<Decimal>().expect("bad sale price")),
        supplier1: Set(supplier1.to_string()),
        supplier2: Set(supplier2.map(str::to_string)),
        affiliate_listed: Set(catalog::is_affiliate_listed(name)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(db).await.expect("Failed to insert product");
}
