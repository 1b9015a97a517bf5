use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

/// Dashboard views whose data is fetched independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    Job,
    Jobs,
    Logs,
    Stats,
    JobQueuesAll,
    JobQueuesActivated,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Job,
        View::Jobs,
        View::Logs,
        View::Stats,
        View::JobQueuesAll,
        View::JobQueuesActivated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Job => "JOB",
            View::Jobs => "JOBS",
            View::Logs => "LOGS",
            View::Stats => "STATS",
            View::JobQueuesAll => "JOB_QUEUES_ALL",
            View::JobQueuesActivated => "JOB_QUEUES_ACTIVATED",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewStatus {
    pub loading: bool,
    pub error: bool,
}

impl Default for ViewStatus {
    fn default() -> Self {
        Self {
            loading: true,
            error: false,
        }
    }
}

/// Loading/error flags per view. A failed fetch flips the view's error flag
/// instead of propagating.
pub struct ViewStatusBoard {
    statuses: Mutex<HashMap<View, ViewStatus>>,
}

impl ViewStatusBoard {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(
                View::ALL
                    .into_iter()
                    .map(|view| (view, ViewStatus::default()))
                    .collect(),
            ),
        }
    }

    pub fn status(&self, view: View) -> ViewStatus {
        self.lock().get(&view).copied().unwrap_or_default()
    }

    pub fn snapshot(&self) -> HashMap<View, ViewStatus> {
        self.lock().clone()
    }

    /// Runs `fetch` for `view`, returning `None` (and flagging the view) if
    /// it fails.
    pub async fn track<T, E, F>(&self, view: View, fetch: F) -> Option<T>
    where
        E: fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        self.record(view, fetch).await.ok()
    }

    /// Like `track`, but hands the error back to callers that need to tell
    /// failures apart.
    pub async fn record<T, E, F>(&self, view: View, fetch: F) -> Result<T, E>
    where
        E: fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        self.set(view, true, false);

        let result = fetch.await;
        match &result {
            Ok(_) => self.set(view, false, false),
            Err(e) => {
                tracing::error!(view = %view, error = %e, "Fetch failed");
                self.set(view, false, true);
            }
        }
        result
    }

    fn set(&self, view: View, loading: bool, error: bool) {
        self.lock().insert(view, ViewStatus { loading, error });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<View, ViewStatus>> {
        self.statuses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ViewStatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
