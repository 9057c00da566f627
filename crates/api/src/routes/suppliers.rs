//! Supplier management routes.

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

use tienda_db::{
    ProductRepository, SupplierRepository,
    changes::{ChangeOp, Collection},
    entities::suppliers,
};
use tienda_shared::AppError;

use crate::error::ApiResult;
use crate::AppState;

/// Creates the supplier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/suppliers/{id}",
            patch(rename_supplier).delete(delete_supplier),
        )
}

/// Request body for creating or renaming a supplier.
#[derive(Debug, Deserialize)]
pub struct SupplierRequest {
    /// Supplier display name.
    pub name: String,
}

/// Optional search filter for supplier listings.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Substring to filter names by, case-insensitive.
    pub search: Option<String>,
}

/// Response for a supplier.
#[derive(Debug, Serialize)]
pub struct SupplierResponse {
    /// Supplier ID.
    pub id: Uuid,
    /// Supplier display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<suppliers::Model> for SupplierResponse {
    fn from(m: suppliers::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

fn validate_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Supplier name must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// GET `/suppliers` - List suppliers in name order.
async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let repo = SupplierRepository::new((*state.db).clone());
    let rows = match params.search.as_deref() {
        Some(term) if !term.trim().is_empty() => repo.search(term.trim()).await?,
        _ => repo.list().await?,
    };
    let response: Vec<SupplierResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/suppliers` - Create a new supplier.
async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<SupplierRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = validate_name(&payload.name)?;

    let repo = SupplierRepository::new((*state.db).clone());
    let created = repo.create(name).await?;
    info!(supplier_id = %created.id, name = %created.name, "Supplier created");

    state.changes.publish(Collection::Suppliers, ChangeOp::Created, created.id);

    Ok((StatusCode::CREATED, Json(SupplierResponse::from(created))))
}

/// PATCH `/suppliers/{id}` - Rename a supplier.
async fn rename_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = validate_name(&payload.name)?;

    let repo = SupplierRepository::new((*state.db).clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Supplier {id} not found")))?;

    let updated = repo.rename(record, name).await?;
    info!(supplier_id = %updated.id, name = %updated.name, "Supplier renamed");

    state.changes.publish(Collection::Suppliers, ChangeOp::Updated, updated.id);

    Ok(Json(SupplierResponse::from(updated)))
}

/// DELETE `/suppliers/{id}` - Delete a supplier that no product references.
async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = SupplierRepository::new((*state.db).clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Supplier {id} not found")))?;

    let products = ProductRepository::new((*state.db).clone());
    if products.references_supplier(&record.name).await? {
        return Err(AppError::Conflict(format!(
            "Supplier '{}' is referenced by products and cannot be deleted",
            record.name
        ))
        .into());
    }

    repo.delete(id).await?;
    info!(supplier_id = %id, "Supplier deleted");

    state.changes.publish(Collection::Suppliers, ChangeOp::Deleted, id);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Acme  ").unwrap(), "Acme");
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(validate_name("   ").is_err());
    }
}
