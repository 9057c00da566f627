//! HTTP API layer with Axum routes and the live watch feed.
//!
//! This crate provides:
//! - REST API routes for affiliates, suppliers, products, and sales
//! - Report generation and file export endpoints
//! - A WebSocket watch endpoint pushing collection snapshots

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tienda_core::report::types::SalesReport;
use tienda_db::ChangeHub;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Change hub feeding the watch endpoint.
    pub changes: Arc<ChangeHub>,
    /// Most recently generated report, consumed by the export endpoints.
    pub current_report: Arc<RwLock<Option<Arc<SalesReport>>>>,
}

impl AppState {
    /// Creates application state around an established connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db: Arc::new(db),
            changes: Arc::new(ChangeHub::new()),
            current_report: Arc::new(RwLock::new(None)),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
