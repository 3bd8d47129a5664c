//! Clinic dashboard server
//!
//! Serves the revenue and financial aggregations behind the clinic admin
//! dashboard. Every endpoint accepts optional `start`/`end` query
//! parameters (RFC 3339 or `YYYY-MM-DD`) and answers with
//! `{ "success": true, "data": ... }`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod storage;

pub use error::*;
pub use server::DashboardServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: DashboardServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
