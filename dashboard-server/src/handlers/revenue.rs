use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use revenue_engine::{
    BillableRecord, BucketRevenue, FinancialSummary, GroupRevenue, RevenueSummary, TimeBucket,
};
use serde::Deserialize;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::DashboardServer;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Reporting window as typed into the dashboard filters
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub bucket: TimeBucket,
}

pub async fn revenue_summary(
    State(server): State<DashboardServer>,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> ApiResult<RevenueSummary> {
    let Query(query) = query.map_err(|e| server.api_error(e))?;
    let window = server.resolve_window(query.start.as_deref(), query.end.as_deref())?;
    let summary = server
        .revenue
        .revenue_summary(&window)
        .await
        .map_err(|e| server.api_error(e))?;
    Ok(Json(api_success(summary)))
}

pub async fn attributed_records(
    State(server): State<DashboardServer>,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> ApiResult<Vec<BillableRecord>> {
    let Query(query) = query.map_err(|e| server.api_error(e))?;
    let window = server.resolve_window(query.start.as_deref(), query.end.as_deref())?;
    let records = server
        .revenue
        .attributed_records(&window)
        .await
        .map_err(|e| server.api_error(e))?;
    Ok(Json(api_success(records)))
}

pub async fn revenue_by_doctor(
    State(server): State<DashboardServer>,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> ApiResult<Vec<GroupRevenue>> {
    let Query(query) = query.map_err(|e| server.api_error(e))?;
    let window = server.resolve_window(query.start.as_deref(), query.end.as_deref())?;
    let rows = server
        .revenue
        .revenue_by_doctor(&window)
        .await
        .map_err(|e| server.api_error(e))?;
    Ok(Json(api_success(rows)))
}

pub async fn revenue_by_insurer(
    State(server): State<DashboardServer>,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> ApiResult<Vec<GroupRevenue>> {
    let Query(query) = query.map_err(|e| server.api_error(e))?;
    let window = server.resolve_window(query.start.as_deref(), query.end.as_deref())?;
    let rows = server
        .revenue
        .revenue_by_insurer(&window)
        .await
        .map_err(|e| server.api_error(e))?;
    Ok(Json(api_success(rows)))
}

pub async fn revenue_timeline(
    State(server): State<DashboardServer>,
    query: Result<Query<TimelineQuery>, QueryRejection>,
) -> ApiResult<Vec<BucketRevenue>> {
    let Query(query) = query.map_err(|e| server.api_error(e))?;
    let window = server.resolve_window(query.start.as_deref(), query.end.as_deref())?;
    let buckets = server
        .revenue
        .revenue_timeline(&window, query.bucket)
        .await
        .map_err(|e| server.api_error(e))?;
    Ok(Json(api_success(buckets)))
}

pub async fn financial_summary(
    State(server): State<DashboardServer>,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> ApiResult<FinancialSummary> {
    let Query(query) = query.map_err(|e| server.api_error(e))?;
    let window = server.resolve_window(query.start.as_deref(), query.end.as_deref())?;
    let summary = server
        .revenue
        .financial_summary(&window)
        .await
        .map_err(|e| server.api_error(e))?;
    Ok(Json(api_success(summary)))
}
