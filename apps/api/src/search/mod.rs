// Search pipeline: filter criteria -> prompt -> grounded provider call ->
// parse -> salary post-filter. All provider calls go through gemini — no
// direct API calls here.

pub mod handlers;
pub mod parser;
pub mod prompts;

use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::gemini::JobDataProvider;
use crate::models::job::{FilterCriteria, JobListing};
use crate::search::parser::ParseOutcome;

/// Outcome of one search. `Skipped` means no filters were set and the
/// provider was never contacted; `Unusable` means the provider answered but
/// the payload could not be interpreted. Both are distinct from a
/// successful search with zero matches.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Listings(Vec<JobListing>),
    Skipped,
    Unusable,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// Grounding citations, passed through unvalidated for display.
    pub sources: Vec<Value>,
}

/// Runs one job search. Transport and provider failures propagate as
/// `AppError::Provider`; unusable payloads do not — they are an outcome,
/// not an error.
pub async fn find_realtime_jobs(
    filters: &FilterCriteria,
    provider: &dyn JobDataProvider,
) -> Result<SearchResult, AppError> {
    if filters.is_empty() {
        debug!("no filters set; skipping provider call");
        return Ok(SearchResult {
            outcome: SearchOutcome::Skipped,
            sources: Vec::new(),
        });
    }

    let prompt = prompts::build_search_prompt(filters);
    let grounded = provider
        .grounded_search(&prompt)
        .await
        .map_err(|e| AppError::Provider(format!("job search failed: {e}")))?;

    let outcome = match parser::parse_listings(&grounded.text, filters) {
        ParseOutcome::Listings(jobs) => SearchOutcome::Listings(jobs),
        ParseOutcome::Unusable => SearchOutcome::Unusable,
    };

    Ok(SearchResult {
        outcome,
        sources: grounded.sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::gemini::{GeminiError, GroundedText};

    /// Canned provider: returns fixed text and counts grounded calls.
    struct CannedProvider {
        text: String,
        sources: Vec<Value>,
        calls: AtomicUsize,
    }

    impl CannedProvider {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                sources: Vec::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JobDataProvider for CannedProvider {
        async fn grounded_search(&self, _prompt: &str) -> Result<GroundedText, GeminiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GroundedText {
                text: self.text.clone(),
                sources: self.sources.clone(),
            })
        }

        async fn structured_json(&self, _prompt: &str, _schema: &Value) -> Result<String, GeminiError> {
            unreachable!("search pipeline never uses structured mode")
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl JobDataProvider for FailingProvider {
        async fn grounded_search(&self, _prompt: &str) -> Result<GroundedText, GeminiError> {
            Err(GeminiError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }

        async fn structured_json(&self, _prompt: &str, _schema: &Value) -> Result<String, GeminiError> {
            Err(GeminiError::EmptyContent)
        }
    }

    const LISTING_ARRAY: &str = r#"[{
        "id": "j-1", "title": "Engineer", "company": "Acme", "location": "Remote",
        "description": "d", "url": "https://example.com/j-1"
    }]"#;

    #[tokio::test]
    async fn test_empty_filters_skip_without_provider_call() {
        let provider = CannedProvider::new(LISTING_ARRAY);
        let result = find_realtime_jobs(&FilterCriteria::default(), &provider)
            .await
            .unwrap();
        assert_eq!(result.outcome, SearchOutcome::Skipped);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fenced_payload_yields_listings() {
        let provider = CannedProvider::new(&format!("```json\n{LISTING_ARRAY}\n```"));
        let filters = FilterCriteria {
            keyword: "Engineer".to_string(),
            ..Default::default()
        };
        let result = find_realtime_jobs(&filters, &provider).await.unwrap();
        match result.outcome {
            SearchOutcome::Listings(jobs) => assert_eq!(jobs[0].id, "j-1"),
            other => panic!("expected listings, got {other:?}"),
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sources_pass_through_even_when_unusable() {
        let provider = CannedProvider {
            text: "no json here".to_string(),
            sources: vec![json!({ "web": { "uri": "https://example.com" } })],
            calls: AtomicUsize::new(0),
        };
        let filters = FilterCriteria {
            keyword: "Engineer".to_string(),
            ..Default::default()
        };
        let result = find_realtime_jobs(&filters, &provider).await.unwrap();
        assert_eq!(result.outcome, SearchOutcome::Unusable);
        assert_eq!(result.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let filters = FilterCriteria {
            keyword: "Engineer".to_string(),
            ..Default::default()
        };
        let err = find_realtime_jobs(&filters, &FailingProvider).await.unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
    }
}
