use axum::{routing::get, Router};

use crate::{
    handlers::{health, revenue},
    server::DashboardServer,
};

/// Create health check routes
pub fn health_routes() -> Router<DashboardServer> {
    Router::new().route("/health", get(health::health_check))
}

/// Create dashboard aggregation routes
pub fn dashboard_routes() -> Router<DashboardServer> {
    Router::new()
        .route("/dashboard/revenue", get(revenue::revenue_summary))
        .route("/dashboard/revenue/records", get(revenue::attributed_records))
        .route("/dashboard/revenue/by-doctor", get(revenue::revenue_by_doctor))
        .route("/dashboard/revenue/by-insurer", get(revenue::revenue_by_insurer))
        .route("/dashboard/revenue/timeline", get(revenue::revenue_timeline))
        .route("/dashboard/financial-summary", get(revenue::financial_summary))
}

pub fn create_routes() -> Router<DashboardServer> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", dashboard_routes())
}
