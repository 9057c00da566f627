//! Product (inventory) routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tienda_core::{affiliate, catalog};
use tienda_db::{
    ProductRepository,
    changes::{ChangeOp, Collection},
    entities::products,
    repositories::ProductInput,
};
use tienda_shared::AppError;

use crate::error::ApiResult;
use crate::AppState;

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            put(update_product).delete(delete_product),
        )
}

/// Request body for creating or updating a product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    /// Product name; an `AF-` prefix lists it for affiliates.
    pub name: String,
    /// Purchase (cost) price.
    pub purchase_price: Decimal,
    /// Sale price, must exceed the purchase price.
    pub sale_price: Decimal,
    /// Primary supplier name.
    pub supplier1: String,
    /// Optional secondary supplier name.
    pub supplier2: Option<String>,
}

/// Catalog filter for product listings.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Affiliate name whose catalog view to return.
    pub affiliate: Option<String>,
}

/// Response for a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Purchase price.
    pub purchase_price: Decimal,
    /// Sale price.
    pub sale_price: Decimal,
    /// Primary supplier name.
    pub supplier1: String,
    /// Optional secondary supplier name.
    pub supplier2: Option<String>,
    /// Whether the product shows in affiliate catalogs.
    pub affiliate_listed: bool,
}

impl From<products::Model> for ProductResponse {
    fn from(m: products::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            purchase_price: m.purchase_price,
            sale_price: m.sale_price,
            supplier1: m.supplier1,
            supplier2: m.supplier2,
            affiliate_listed: m.affiliate_listed,
        }
    }
}

impl ProductRequest {
    fn validate(&self) -> Result<ProductInput, tienda_core::catalog::CatalogError> {
        catalog::validate_product(
            &self.name,
            self.purchase_price,
            self.sale_price,
            &self.supplier1,
        )?;
        Ok(ProductInput {
            name: self.name.trim().to_owned(),
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            supplier1: self.supplier1.trim().to_owned(),
            supplier2: self
                .supplier2
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        })
    }
}

/// GET `/products` - List products. With `?affiliate=NAME` the listing is
/// narrowed to that affiliate's catalog: the reserved owner sees unlisted
/// products, everyone else sees the affiliate-listed ones.
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let repo = ProductRepository::new((*state.db).clone());
    let rows = match params.affiliate.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            repo.list_by_listing(!affiliate::is_reserved(name.trim()))
                .await?
        }
        _ => repo.list().await?,
    };
    let response: Vec<ProductResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/products` - Create a product.
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;

    let repo = ProductRepository::new((*state.db).clone());
    let created = repo.create(input).await?;
    info!(
        product_id = %created.id,
        name = %created.name,
        affiliate_listed = created.affiliate_listed,
        "Product created"
    );

    state.changes.publish(Collection::Products, ChangeOp::Created, created.id);

    Ok((StatusCode::CREATED, Json(ProductResponse::from(created))))
}

/// PUT `/products/{id}` - Replace a product's fields. The listing flag is
/// re-derived from the submitted name.
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.validate()?;

    let repo = ProductRepository::new((*state.db).clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    let updated = repo.update(record, input).await?;
    info!(product_id = %updated.id, name = %updated.name, "Product updated");

    state.changes.publish(Collection::Products, ChangeOp::Updated, updated.id);

    Ok(Json(ProductResponse::from(updated)))
}

/// DELETE `/products/{id}` - Delete a product. Past sales keep their copied
/// name and prices.
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = ProductRepository::new((*state.db).clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    repo.delete(record.id).await?;
    info!(product_id = %id, "Product deleted");

    state.changes.publish(Collection::Products, ChangeOp::Deleted, id);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tienda_core::catalog::CatalogError;

    fn request(name: &str) -> ProductRequest {
        ProductRequest {
            name: name.to_string(),
            purchase_price: dec!(5.00),
            sale_price: dec!(8.00),
            supplier1: "  Acme  ".to_string(),
            supplier2: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_validate_trims_fields_and_drops_blank_supplier2() {
        let input = request(" AF-Widget ").validate().unwrap();
        assert_eq!(input.name, "AF-Widget");
        assert_eq!(input.supplier1, "Acme");
        assert_eq!(input.supplier2, None);
    }

    #[test]
    fn test_validate_rejects_sale_at_or_below_cost() {
        let mut req = request("Widget");
        req.sale_price = dec!(5.00);
        assert!(matches!(
            req.validate(),
            Err(CatalogError::SaleNotAboveCost { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert_eq!(
            request("   ").validate().unwrap_err(),
            CatalogError::MissingField("name")
        );
    }
}
