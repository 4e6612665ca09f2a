//! Axum route handlers for the Analytics API.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::analytics::{
    facets, in_demand_roles, salary_histogram, salary_midpoints, top_companies, AggregateCount,
    Facets, SalaryBin,
};
use crate::models::trend::TrendDataPoint;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub top_companies: Vec<AggregateCount>,
    pub in_demand_roles: Vec<AggregateCount>,
    pub salary_histogram: Vec<SalaryBin>,
    pub facets: Facets,
    pub trend_keyword: String,
    pub trend: Option<Vec<TrendDataPoint>>,
}

/// GET /api/v1/analytics
///
/// Recomputes all derived views over the session's current listing set.
/// Pure and deterministic — identical listings yield identical output.
pub async fn handle_get_analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    let snapshot = state.dashboard.snapshot();
    let midpoints = salary_midpoints(&snapshot.jobs);

    Json(AnalyticsResponse {
        top_companies: top_companies(&snapshot.jobs),
        in_demand_roles: in_demand_roles(&snapshot.jobs),
        salary_histogram: salary_histogram(&midpoints),
        facets: facets(&snapshot.jobs),
        trend_keyword: snapshot.trend_keyword,
        trend: snapshot.trend,
    })
}
