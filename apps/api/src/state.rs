use std::sync::Arc;

use crate::config::Config;
use crate::gemini::JobDataProvider;
use crate::session::Dashboard;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable provider handle. Production: `GeminiClient`. Tests swap in
    /// fakes returning canned text.
    pub provider: Arc<dyn JobDataProvider>,
    /// In-memory session: current listings, trend series, generation tokens.
    pub dashboard: Arc<Dashboard>,
    /// Kept for handlers that grow config knobs; only `main` reads it today.
    #[allow(dead_code)]
    pub config: Config,
}
