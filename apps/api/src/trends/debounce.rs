//! Debounced trend refresh with last-write-wins commit discipline.
//!
//! Every keyword CHANGE claims a fresh trend token and sleeps out a
//! quiescence window; a request for the unchanged keyword claims nothing,
//! so polling readers can never starve a pending refresh or refire the
//! provider after it commits. When the window ends, the task fires only if
//! no newer change has claimed a later token — rapid edits collapse to one
//! provider call for the final keyword. The commit re-checks the token, so
//! even a slow in-flight response cannot overwrite a newer series.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::gemini::JobDataProvider;
use crate::session::Dashboard;
use crate::trends::fetch_trend;

/// Quiescence window before a keyword change triggers a fetch.
pub const TREND_DEBOUNCE: Duration = Duration::from_millis(500);

/// Schedules a debounced trend refresh for `keyword`. Returns `None`
/// without claiming a token when the keyword matches the last request —
/// an unchanged keyword is a pure read. On a change the token is claimed
/// immediately so an already-sleeping refresh for the prior keyword is
/// superseded before it fires.
pub fn schedule_refresh(
    dashboard: Arc<Dashboard>,
    provider: Arc<dyn JobDataProvider>,
    keyword: String,
    debounce: Duration,
) -> Option<JoinHandle<()>> {
    let token = dashboard.begin_trend_for(&keyword)?;
    Some(tokio::spawn(async move {
        tokio::time::sleep(debounce).await;
        if !dashboard.is_latest_trend(token) {
            debug!("trend refresh for {keyword:?} superseded during debounce");
            return;
        }

        let series = fetch_trend(&keyword, provider.as_ref()).await;
        if !dashboard.commit_trend(token, &keyword, series) {
            debug!("trend refresh for {keyword:?} superseded in flight");
        }
    }))
}
