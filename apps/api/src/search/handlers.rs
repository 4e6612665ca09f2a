//! Axum route handlers for the Search API.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::job::{FilterCriteria, JobListing};
use crate::search::{find_realtime_jobs, SearchOutcome};
use crate::session::SearchStatus;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub status: SearchStatus,
    pub jobs: Vec<JobListing>,
    pub sources: Vec<Value>,
}

/// POST /api/v1/jobs/search
///
/// Runs one search against the provider and commits the result to the
/// session. The commit is token-guarded: if a newer search was issued while
/// this one was in flight, this result is returned to its caller but does
/// not overwrite the session.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(filters): Json<FilterCriteria>,
) -> Result<Json<SearchResponse>, AppError> {
    let token = state.dashboard.begin_search();

    let result = match find_realtime_jobs(&filters, state.provider.as_ref()).await {
        Ok(result) => result,
        Err(e) => {
            // Provider failure clears any partial results before surfacing.
            state.dashboard.commit_search(token, SearchStatus::Failed, Vec::new(), Vec::new());
            return Err(e);
        }
    };

    let (status, jobs) = match result.outcome {
        SearchOutcome::Listings(jobs) => (SearchStatus::Listings, jobs),
        SearchOutcome::Skipped => (SearchStatus::Skipped, Vec::new()),
        SearchOutcome::Unusable => (SearchStatus::Unusable, Vec::new()),
    };

    state
        .dashboard
        .commit_search(token, status, jobs.clone(), result.sources.clone());

    Ok(Json(SearchResponse {
        status,
        jobs,
        sources: result.sources,
    }))
}

/// GET /api/v1/jobs
///
/// Returns the session's current listing set and citation metadata.
pub async fn handle_get_jobs(State(state): State<AppState>) -> Json<SearchResponse> {
    let snapshot = state.dashboard.snapshot();
    Json(SearchResponse {
        status: snapshot.status,
        jobs: snapshot.jobs,
        sources: snapshot.sources,
    })
}
