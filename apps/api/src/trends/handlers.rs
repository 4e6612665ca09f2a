//! Axum route handlers for the Trend API.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::trend::TrendDataPoint;
use crate::state::AppState;
use crate::trends::debounce::{schedule_refresh, TREND_DEBOUNCE};

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// Absent means "just read the current series". An explicit empty
    /// keyword (`?keyword=`) is a change request that clears it.
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    /// Keyword of the currently committed series — may lag a just-changed
    /// query keyword while the debounced refresh is pending.
    pub keyword: String,
    pub points: Option<Vec<TrendDataPoint>>,
}

/// GET /api/v1/trends?keyword=...
///
/// Schedules a debounced refresh when the queried keyword differs from the
/// last requested one; polling an unchanged keyword (or omitting it) is a
/// pure read of the committed series.
pub async fn handle_get_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Json<TrendResponse> {
    if let Some(keyword) = query.keyword {
        schedule_refresh(
            state.dashboard.clone(),
            state.provider.clone(),
            keyword,
            TREND_DEBOUNCE,
        );
    }

    let snapshot = state.dashboard.snapshot();
    Json(TrendResponse {
        keyword: snapshot.trend_keyword,
        points: snapshot.trend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::gemini::{GeminiError, GroundedText, JobDataProvider};
    use crate::session::Dashboard;

    /// Provider that must never be reached by a pure read.
    struct UnreachableProvider;

    #[async_trait]
    impl JobDataProvider for UnreachableProvider {
        async fn grounded_search(&self, _prompt: &str) -> Result<GroundedText, GeminiError> {
            unreachable!("a trend read must not call the provider")
        }

        async fn structured_json(&self, _prompt: &str, _schema: &Value) -> Result<String, GeminiError> {
            unreachable!("a trend read must not call the provider")
        }
    }

    fn state_with(dashboard: Arc<Dashboard>) -> AppState {
        AppState {
            provider: Arc::new(UnreachableProvider),
            dashboard,
            config: Config {
                gemini_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_keywordless_read_leaves_committed_series_intact() {
        let dashboard = Arc::new(Dashboard::new());
        let token = dashboard.begin_trend_for("rust").unwrap();
        let series = vec![TrendDataPoint {
            month: "Jul".to_string(),
            score: 60.0,
        }];
        assert!(dashboard.commit_trend(token, "rust", Some(series)));

        let response = handle_get_trend(
            State(state_with(dashboard.clone())),
            Query(TrendQuery { keyword: None }),
        )
        .await;

        assert_eq!(response.0.keyword, "rust");
        assert!(response.0.points.is_some());
        // The committed state is untouched by the read.
        let snap = dashboard.snapshot();
        assert_eq!(snap.trend_keyword, "rust");
        assert!(snap.trend.is_some());
    }

    #[tokio::test]
    async fn test_unchanged_keyword_read_is_a_pure_read() {
        let dashboard = Arc::new(Dashboard::new());
        let token = dashboard.begin_trend_for("rust").unwrap();
        assert!(dashboard.commit_trend(token, "rust", Some(Vec::new())));

        let response = handle_get_trend(
            State(state_with(dashboard.clone())),
            Query(TrendQuery {
                keyword: Some("rust".to_string()),
            }),
        )
        .await;

        assert_eq!(response.0.keyword, "rust");
        assert!(dashboard.snapshot().trend.is_some());
    }
}
