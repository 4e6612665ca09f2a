pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analytics;
use crate::search;
use crate::state::AppState;
use crate::trends;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/search", post(search::handlers::handle_search))
        .route("/api/v1/jobs", get(search::handlers::handle_get_jobs))
        .route("/api/v1/trends", get(trends::handlers::handle_get_trend))
        .route(
            "/api/v1/analytics",
            get(analytics::handlers::handle_get_analytics),
        )
        .with_state(state)
}
