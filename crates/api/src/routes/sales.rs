//! Sale capture routes. A sale copies the product's name and prices at
//! capture time, so later catalog edits never rewrite it.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tienda_core::{affiliate, catalog};
use tienda_db::{
    AffiliateRepository, ProductRepository, SaleRepository,
    changes::{ChangeOp, Collection},
    entities::sales,
    repositories::SaleInput,
};
use tienda_shared::AppError;

use crate::error::ApiResult;
use crate::AppState;

/// Creates the sale routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales).post(create_sale))
}

/// Request body for recording a sale.
#[derive(Debug, Deserialize)]
pub struct SaleRequest {
    /// Affiliate the sale belongs to.
    pub affiliate: String,
    /// Business date of the sale.
    pub sale_date: NaiveDate,
    /// Product sold.
    pub product_id: Uuid,
}

/// Optional date window for sale listings.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
}

/// Response for a sale.
#[derive(Debug, Serialize)]
pub struct SaleResponse {
    /// Sale ID.
    pub id: Uuid,
    /// Affiliate the sale belongs to.
    pub affiliate: String,
    /// Business date of the sale.
    pub sale_date: NaiveDate,
    /// Product the sale was captured from.
    pub product_id: Uuid,
    /// Product name at capture time.
    pub product_name: String,
    /// Purchase price at capture time.
    pub purchase_price: Decimal,
    /// Sale price at capture time.
    pub sale_price: Decimal,
}

impl From<sales::Model> for SaleResponse {
    fn from(m: sales::Model) -> Self {
        Self {
            id: m.id,
            affiliate: m.affiliate,
            sale_date: m.sale_date,
            product_id: m.product_id,
            product_name: m.product_name,
            purchase_price: m.purchase_price,
            sale_price: m.sale_price,
        }
    }
}

/// GET `/sales` - List sales, optionally windowed by `?from=` and `?to=`.
async fn list_sales(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    if let (Some(from), Some(to)) = (params.from, params.to) {
        if from > to {
            return Err(AppError::Validation(format!(
                "Invalid date range: start {from} is after end {to}"
            ))
            .into());
        }
    }

    let repo = SaleRepository::new((*state.db).clone());
    let rows = repo.find_in_range(params.from, params.to).await?;
    let response: Vec<SaleResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/sales` - Record a sale against an affiliate's catalog.
async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<SaleRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = affiliate::validate_name(&payload.affiliate)?;

    let affiliates = AffiliateRepository::new((*state.db).clone());
    if !affiliates.name_taken(name, None).await? {
        return Err(AppError::NotFound(format!("Affiliate '{name}' not found")).into());
    }

    let products = ProductRepository::new((*state.db).clone());
    let product = products
        .find_by_id(payload.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", payload.product_id)))?;

    // Affiliates can only sell from their own catalog view.
    if !catalog::visible_to(name, product.affiliate_listed) {
        return Err(AppError::BusinessRule(format!(
            "Product '{}' is not in the catalog of '{name}'",
            product.name
        ))
        .into());
    }

    let repo = SaleRepository::new((*state.db).clone());
    let created = repo
        .create(SaleInput {
            affiliate: name.to_owned(),
            sale_date: payload.sale_date,
            product_id: product.id,
            product_name: product.name,
            purchase_price: product.purchase_price,
            sale_price: product.sale_price,
        })
        .await?;
    info!(
        sale_id = %created.id,
        affiliate = %created.affiliate,
        product = %created.product_name,
        "Sale recorded"
    );

    state.changes.publish(Collection::Sales, ChangeOp::Created, created.id);

    Ok((StatusCode::CREATED, Json(SaleResponse::from(created))))
}
