use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::DashboardServer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime: u64,
    pub default_window_days: u32,
}

/// Health check handler
pub async fn health_check(State(server): State<DashboardServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime_seconds(),
        default_window_days: server.revenue.default_window_days(),
    })
}
