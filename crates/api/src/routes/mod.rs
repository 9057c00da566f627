//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod affiliates;
pub mod health;
pub mod products;
pub mod reports;
pub mod sales;
pub mod suppliers;
pub mod watch;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(affiliates::routes())
        .merge(suppliers::routes())
        .merge(products::routes())
        .merge(sales::routes())
        .merge(reports::routes())
        .merge(watch::routes())
}
