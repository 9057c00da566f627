//! Affiliate management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tienda_core::affiliate;
use tienda_db::{
    AffiliateRepository, SaleRepository,
    changes::{ChangeOp, Collection},
    entities::affiliates,
};
use tienda_shared::AppError;

use crate::error::ApiResult;
use crate::AppState;

/// Creates the affiliate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/affiliates", get(list_affiliates).post(create_affiliate))
        .route(
            "/affiliates/{id}",
            patch(rename_affiliate).delete(delete_affiliate),
        )
}

/// Request body for creating or renaming an affiliate.
#[derive(Debug, Deserialize)]
pub struct AffiliateRequest {
    /// Affiliate display name.
    pub name: String,
}

/// Optional search filter for affiliate listings.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Name prefix to filter by.
    pub search: Option<String>,
}

/// Response for an affiliate.
#[derive(Debug, Serialize)]
pub struct AffiliateResponse {
    /// Affiliate ID.
    pub id: Uuid,
    /// Affiliate display name.
    pub name: String,
    /// Whether this is the reserved owner entry.
    pub reserved: bool,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<affiliates::Model> for AffiliateResponse {
    fn from(m: affiliates::Model) -> Self {
        Self {
            reserved: affiliate::is_reserved(&m.name),
            id: m.id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

/// GET `/affiliates` - List affiliates, reserved entry first.
async fn list_affiliates(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let repo = AffiliateRepository::new((*state.db).clone());
    let rows = match params.search.as_deref() {
        Some(prefix) if !prefix.trim().is_empty() => repo.search_prefix(prefix.trim()).await?,
        _ => repo.list().await?,
    };
    let response: Vec<AffiliateResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/affiliates` - Create a new affiliate.
async fn create_affiliate(
    State(state): State<AppState>,
    Json(payload): Json<AffiliateRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = affiliate::validate_name(&payload.name)?;

    let repo = AffiliateRepository::new((*state.db).clone());
    if repo.name_taken(name, None).await? {
        return Err(affiliate::AffiliateError::DuplicateName(name.to_owned()).into());
    }

    let created = repo.create(name).await?;
    info!(affiliate_id = %created.id, name = %created.name, "Affiliate created");

    state.changes.publish(Collection::Affiliates, ChangeOp::Created, created.id);

    Ok((StatusCode::CREATED, Json(AffiliateResponse::from(created))))
}

/// PATCH `/affiliates/{id}` - Rename an affiliate. The reserved entry
/// cannot be renamed.
async fn rename_affiliate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AffiliateRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = AffiliateRepository::new((*state.db).clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Affiliate {id} not found")))?;

    affiliate::check_mutable(&record.name)?;
    let name = affiliate::validate_name(&payload.name)?;

    if repo.name_taken(name, Some(id)).await? {
        return Err(affiliate::AffiliateError::DuplicateName(name.to_owned()).into());
    }

    let updated = repo.rename(record, name).await?;
    info!(affiliate_id = %updated.id, name = %updated.name, "Affiliate renamed");

    state.changes.publish(Collection::Affiliates, ChangeOp::Updated, updated.id);

    Ok(Json(AffiliateResponse::from(updated)))
}

/// DELETE `/affiliates/{id}` - Delete an affiliate without sales history.
async fn delete_affiliate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = AffiliateRepository::new((*state.db).clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Affiliate {id} not found")))?;

    affiliate::check_mutable(&record.name)?;

    let sales = SaleRepository::new((*state.db).clone());
    if sales.exists_for_affiliate(&record.name).await? {
        return Err(affiliate::AffiliateError::HasSales(record.name).into());
    }

    repo.delete(id).await?;
    info!(affiliate_id = %id, "Affiliate deleted");

    state.changes.publish(Collection::Affiliates, ChangeOp::Deleted, id);

    Ok(StatusCode::NO_CONTENT)
}
