//! Trend Fetcher — 12-month "interest over time" series for a keyword.
//!
//! Uses the provider's structured mode with a strict value schema, then
//! re-validates locally anyway: the series must be exactly twelve points,
//! each with a month label and a score in [0, 100]. Any malformed entry
//! invalidates the whole series — no partial data. Trend is a decorative
//! feature, so every failure is swallowed to `None` and never surfaced.

pub mod debounce;
pub mod handlers;

use serde_json::{json, Value};
use tracing::warn;

use crate::gemini::JobDataProvider;
use crate::models::trend::TrendDataPoint;
use crate::search::parser::extract_json_payload;
use crate::search::prompts::build_trend_prompt;

/// A well-formed series covers exactly the trailing twelve months.
pub const TREND_MONTHS: usize = 12;

/// Value schema sent with the structured-mode request. The provider claims
/// to enforce it; `parse_trend_series` does not rely on that claim.
fn trend_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "month": {
                    "type": "STRING",
                    "description": "The abbreviated month name (e.g., \"Jan\", \"Feb\")."
                },
                "score": {
                    "type": "NUMBER",
                    "description": "A fictional popularity score from 0 to 100."
                }
            },
            "required": ["month", "score"]
        }
    })
}

/// Fetches the trend series for a keyword. An empty keyword short-circuits
/// to `None` without a provider call.
pub async fn fetch_trend(keyword: &str, provider: &dyn JobDataProvider) -> Option<Vec<TrendDataPoint>> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }

    let prompt = build_trend_prompt(keyword);
    let raw = match provider.structured_json(&prompt, &trend_schema()).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("trend fetch failed for {keyword:?}: {e}");
            return None;
        }
    };

    parse_trend_series(&raw)
}

/// Validates the raw series text. Returns `None` for anything other than a
/// complete, in-range twelve-point series.
pub fn parse_trend_series(raw: &str) -> Option<Vec<TrendDataPoint>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!("provider returned empty response text for trend data");
        return None;
    }

    let points: Vec<TrendDataPoint> = match serde_json::from_str(extract_json_payload(trimmed)) {
        Ok(points) => points,
        Err(e) => {
            warn!("failed to parse trend series: {e}; raw text: {trimmed}");
            return None;
        }
    };

    if points.len() != TREND_MONTHS {
        warn!("trend series has {} points, expected {TREND_MONTHS}", points.len());
        return None;
    }
    if points
        .iter()
        .any(|p| p.month.trim().is_empty() || !(0.0..=100.0).contains(&p.score))
    {
        warn!("trend series contains a malformed point; discarding whole series");
        return None;
    }

    Some(points)
}
