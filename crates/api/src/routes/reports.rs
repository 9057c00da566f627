//! Sales report routes: generation plus PDF and XLSX export.
//!
//! Generation stores the built report in shared state; the export routes
//! render whatever report was generated last. Exporting before generating
//! is rejected.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use tienda_core::export::{self, export_file_name};
use tienda_core::report::{DateRange, ReportService, SaleRecord, SalesReport};
use tienda_db::SaleRepository;
use tienda_shared::{AppError, types::SaleId};

use crate::error::ApiResult;
use crate::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/sales", post(generate_report).get(current_report))
        .route("/reports/sales/export/pdf", get(export_pdf))
        .route("/reports/sales/export/xlsx", get(export_xlsx))
}

/// Request body for report generation.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// First day included.
    pub from: NaiveDate,
    /// Last day included.
    pub to: NaiveDate,
}

/// POST `/reports/sales` - Generate the report for a date range and make it
/// the current export source. A range with no sales clears the current
/// report and reports that outcome rather than failing.
async fn generate_report(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> ApiResult<impl IntoResponse> {
    let range = DateRange::new(payload.from, payload.to)?;

    let repo = SaleRepository::new((*state.db).clone());
    let rows = repo
        .find_in_range(Some(range.start), Some(range.end))
        .await?;
    let records: Vec<SaleRecord> = rows
        .into_iter()
        .map(|m| SaleRecord {
            id: SaleId::from_uuid(m.id),
            affiliate: m.affiliate,
            date: m.sale_date,
            product_name: m.product_name,
            purchase_price: m.purchase_price,
            sale_price: m.sale_price,
        })
        .collect();

    match ReportService::build(range, records) {
        Ok(report) => {
            info!(
                start = %range.start,
                end = %range.end,
                records = report.record_count(),
                groups = report.groups.len(),
                "Sales report generated"
            );
            let report = Arc::new(report);
            *state.current_report.write().await = Some(Arc::clone(&report));
            Ok(Json(json!({ "status": "ok", "report": &*report })).into_response())
        }
        Err(tienda_core::report::ReportError::NoRecords) => {
            *state.current_report.write().await = None;
            Ok(Json(json!({ "status": "no_records" })).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET `/reports/sales` - Return the current report, if one was generated.
async fn current_report(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let report = require_report(&state).await?;
    Ok(Json(json!({ "status": "ok", "report": &*report })))
}

/// GET `/reports/sales/export/pdf` - Download the current report as PDF.
async fn export_pdf(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let report = require_report(&state).await?;
    let bytes = export::export_pdf(&report);
    Ok(download_response(
        bytes,
        "application/pdf",
        export_file_name(report.range, "pdf"),
    ))
}

/// GET `/reports/sales/export/xlsx` - Download the current report as XLSX.
async fn export_xlsx(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let report = require_report(&state).await?;
    let bytes = export::export_xlsx(&report)?;
    Ok(download_response(
        bytes,
        XLSX_CONTENT_TYPE,
        export_file_name(report.range, "xlsx"),
    ))
}

async fn require_report(state: &AppState) -> Result<Arc<SalesReport>, AppError> {
    state
        .current_report
        .read()
        .await
        .clone()
        .ok_or_else(|| AppError::BusinessRule("Generate a report before exporting".into()))
}

fn download_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    file_name: String,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use tower::ServiceExt;

    use tienda_db::entities::sales;

    use crate::{AppState, create_router};

    fn app(db: DatabaseConnection) -> Router {
        create_router(AppState::new(db))
    }

    fn sale_row() -> sales::Model {
        sales::Model {
            id: uuid::Uuid::new_v4(),
            affiliate: "GODSPLAN".to_string(),
            sale_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
            product_id: uuid::Uuid::new_v4(),
            product_name: "Widget".to_string(),
            purchase_price: dec!(10),
            sale_price: dec!(15),
            created_at: chrono::Utc::now().into(),
        }
    }

    fn generate_request(from: &str, to: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/reports/sales")
            .header("Content-Type", "application/json")
            .body(Body::from(format!(r#"{{"from":"{from}","to":"{to}"}}"#)))
            .unwrap()
    }

    fn export_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_export_before_generate_returns_422_without_a_file() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = app(db);

        for uri in [
            "/api/v1/reports/sales/export/pdf",
            "/api/v1/reports/sales/export/xlsx",
        ] {
            let response = app.clone().oneshot(export_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());

            let body = body_json(response).await;
            assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");
        }
    }

    #[tokio::test]
    async fn test_empty_generation_clears_the_current_report() {
        // First generation finds one sale, the second finds none.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sale_row()], vec![]])
            .into_connection();
        let app = app(db);

        let response = app
            .clone()
            .oneshot(generate_request("2026-08-01", "2026-08-31"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["report"]["groups"][0]["affiliate"], "GODSPLAN");

        let response = app
            .clone()
            .oneshot(export_request("/api/v1/reports/sales/export/pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF"));

        let response = app
            .clone()
            .oneshot(generate_request("2026-09-01", "2026-09-30"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "no_records");

        // The stale August report must not come back out.
        let response = app
            .clone()
            .oneshot(export_request("/api/v1/reports/sales/export/pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_before_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = app(db);

        let response = app
            .oneshot(generate_request("2026-08-31", "2026-08-01"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}
