//! Response Parser — turns raw provider text into typed job listings.
//!
//! The grounded-search channel is untrusted free text: the payload may be a
//! bare JSON array or an array wrapped in a markdown code fence. Parse
//! failures are never fatal — they surface as an `Unusable` outcome so the
//! view can distinguish "nothing found" from "response was garbage".

use tracing::{error, warn};

use crate::models::job::{FilterCriteria, JobListing};

/// Tagged parse result. `Listings(vec![])` means the search succeeded with
/// zero matches; `Unusable` means the payload could not be interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Listings(Vec<JobListing>),
    Unusable,
}

/// Extracts the parsable payload from raw model text: the interior of the
/// first triple-backtick fence (optionally tagged `json`) when one closes,
/// otherwise the trimmed whole.
pub fn extract_json_payload(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };
    let interior = &trimmed[open + 3..];
    let interior = interior.strip_prefix("json").unwrap_or(interior);
    match interior.find("```") {
        Some(close) => interior[..close].trim(),
        // Unterminated fence: fall through to the whole text and let the
        // JSON parser reject it.
        None => trimmed,
    }
}

/// Parses the provider response into listings and applies the salary
/// post-filter. Empty text, non-array JSON, and schema mismatches all log
/// the offending text and come back `Unusable`.
pub fn parse_listings(raw: &str, filters: &FilterCriteria) -> ParseOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!("provider returned empty response text for job search");
        return ParseOutcome::Unusable;
    }

    let payload = extract_json_payload(trimmed);
    match serde_json::from_str::<Vec<JobListing>>(payload) {
        Ok(listings) => {
            let kept = listings
                .into_iter()
                .filter(|job| salary_overlaps(job, filters))
                .collect();
            ParseOutcome::Listings(kept)
        }
        Err(e) => {
            error!("failed to parse job listings from provider response: {e}");
            error!("offending response text: {trimmed}");
            ParseOutcome::Unusable
        }
    }
}

/// Inclusive-overlap salary filter. Listings with no salary data are always
/// kept; otherwise the effective range [min ?? 0, max ?? +inf] must
/// intersect the filter range. An inverted filter range yields the empty
/// intersection, so salaried listings drop and salary-less ones stay.
fn salary_overlaps(job: &JobListing, filters: &FilterCriteria) -> bool {
    if job.salary_min.is_none() && job.salary_max.is_none() {
        return true;
    }
    let job_min = job.salary_min.unwrap_or(0.0);
    let job_max = job.salary_max.unwrap_or(f64::INFINITY);
    job_max >= filters.min_salary && job_min <= filters.max_salary
}
