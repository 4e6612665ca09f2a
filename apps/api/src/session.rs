//! Dashboard session state — the current listing set and trend series.
//!
//! Everything here is ephemeral and replaced wholesale: a search swaps the
//! listing set, a trend fetch swaps the series. Commits carry a generation
//! token claimed at request start; a commit whose token is no longer the
//! latest is discarded, so a slow early response can never overwrite a
//! newer one (last-write-wins keyed on issue order).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::models::job::JobListing;
use crate::models::trend::TrendDataPoint;

/// How the most recent committed search ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// No search has run yet this session.
    #[default]
    Idle,
    /// Provider answered with a parsable listing array (possibly empty).
    Listings,
    /// No filters were set; the provider was never contacted.
    Skipped,
    /// Provider answered but the payload was unusable.
    Unusable,
    /// Transport or provider failure; results were cleared.
    Failed,
}

/// Point-in-time copy of the session handed to read handlers.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub status: SearchStatus,
    pub jobs: Vec<JobListing>,
    pub sources: Vec<Value>,
    pub trend_keyword: String,
    pub trend: Option<Vec<TrendDataPoint>>,
}

#[derive(Default)]
pub struct Dashboard {
    inner: RwLock<Snapshot>,
    search_generation: AtomicU64,
    trend_generation: AtomicU64,
    /// Last keyword a trend refresh was requested for. Pending requests
    /// count: polling an unchanged keyword must not restart the debounce.
    trend_request: RwLock<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a token for a new search. Claiming immediately supersedes any
    /// in-flight search, whose eventual commit will be discarded.
    pub fn begin_search(&self) -> u64 {
        self.search_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claims a token unconditionally. `begin_trend_for` is the
    /// keyword-aware entry used by the scheduler.
    pub fn begin_trend(&self) -> u64 {
        self.trend_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claims a trend token only when `keyword` differs from the most
    /// recently requested one. Repeated polls for the same keyword are
    /// reads — they must neither restart the debounce nor refire the
    /// provider once the series has committed.
    pub fn begin_trend_for(&self, keyword: &str) -> Option<u64> {
        let mut requested = self.trend_request.write().expect("dashboard lock poisoned");
        if *requested == keyword {
            return None;
        }
        *requested = keyword.to_string();
        Some(self.begin_trend())
    }

    /// True while `token` is still the most recently claimed trend token.
    /// The debounce re-checks this before firing the provider call.
    pub fn is_latest_trend(&self, token: u64) -> bool {
        self.trend_generation.load(Ordering::SeqCst) == token
    }

    /// Applies a search result if `token` is still current. Returns whether
    /// the commit was applied.
    pub fn commit_search(
        &self,
        token: u64,
        status: SearchStatus,
        jobs: Vec<JobListing>,
        sources: Vec<Value>,
    ) -> bool {
        let mut inner = self.inner.write().expect("dashboard lock poisoned");
        if self.search_generation.load(Ordering::SeqCst) != token {
            debug!("discarding superseded search commit (token {token})");
            return false;
        }
        inner.status = status;
        inner.jobs = jobs;
        inner.sources = sources;
        true
    }

    /// Applies a trend series (or clears it with `None`) if `token` is
    /// still current. Returns whether the commit was applied.
    pub fn commit_trend(&self, token: u64, keyword: &str, trend: Option<Vec<TrendDataPoint>>) -> bool {
        let mut inner = self.inner.write().expect("dashboard lock poisoned");
        if self.trend_generation.load(Ordering::SeqCst) != token {
            debug!("discarding stale trend response for {keyword:?} (token {token})");
            return false;
        }
        inner.trend_keyword = keyword.to_string();
        inner.trend = trend;
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().expect("dashboard lock poisoned").clone()
    }
}
