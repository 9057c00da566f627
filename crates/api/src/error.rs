//! Conversion of domain errors into HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use tienda_core::affiliate::error::AffiliateError;
use tienda_core::catalog::error::CatalogError;
use tienda_core::export::ExportError;
use tienda_core::report::error::ReportError;
use tienda_shared::AppError;

/// Error wrapper returned by route handlers. Carries an [`AppError`] so the
/// status code and error code stay consistent across the whole API.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<AffiliateError> for ApiError {
    fn from(err: AffiliateError) -> Self {
        let message = err.to_string();
        Self(match err {
            AffiliateError::EmptyName => AppError::Validation(message),
            AffiliateError::ReservedImmutable => AppError::BusinessRule(message),
            AffiliateError::DuplicateName(_) | AffiliateError::HasSales(_) => {
                AppError::Conflict(message)
            }
        })
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        Self(match err {
            CatalogError::NegativePrice | CatalogError::MissingField(_) => {
                AppError::Validation(message)
            }
            CatalogError::SaleNotAboveCost { .. } => AppError::BusinessRule(message),
        })
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        let message = err.to_string();
        Self(match err {
            ReportError::InvalidDateRange { .. } => AppError::Validation(message),
            ReportError::NoRecords => AppError::BusinessRule(message),
        })
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affiliate_errors_map_to_statuses() {
        let e: ApiError = AffiliateError::EmptyName.into();
        assert_eq!(e.0.status_code(), 400);
        let e: ApiError = AffiliateError::ReservedImmutable.into();
        assert_eq!(e.0.status_code(), 422);
        let e: ApiError = AffiliateError::DuplicateName("Ana".into()).into();
        assert_eq!(e.0.status_code(), 409);
        let e: ApiError = AffiliateError::HasSales("Ana".into()).into();
        assert_eq!(e.0.status_code(), 409);
    }

    #[test]
    fn test_report_errors_map_to_statuses() {
        let e: ApiError = ReportError::NoRecords.into();
        assert_eq!(e.0.status_code(), 422);
    }

    #[test]
    fn test_db_error_is_internal() {
        let e: ApiError = DbErr::Custom("boom".into()).into();
        assert_eq!(e.0.status_code(), 500);
    }
}
