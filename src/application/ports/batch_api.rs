use async_trait::async_trait;

use crate::domain::{
    JobId, JobStatus, LogEntry, QueryParams, RawJob, ReportingWindow, SortColumn, SortDirection,
    StatInterval,
};

/// Upstream page size for job listings.
pub const JOBS_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct JobListQuery {
    pub q: String,
    pub page: u32,
    pub queue: Option<String>,
    pub status: Option<JobStatus>,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
}

impl JobListQuery {
    /// Query pairs for the upstream request. Empty values are not sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("sortColumn", self.sort_column.as_str().to_string()),
            ("sortDirection", self.sort_direction.as_str().to_string()),
        ];
        if !self.q.is_empty() {
            pairs.push(("q", self.q.clone()));
        }
        if let Some(queue) = self.queue.as_ref().filter(|q| !q.is_empty()) {
            pairs.push(("queue", queue.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }

    /// The following page number, if a page of `returned` jobs was full.
    pub fn next_page(&self, returned: usize) -> Option<u32> {
        (returned >= JOBS_PAGE_SIZE).then(|| self.page + 1)
    }
}

impl From<&QueryParams> for JobListQuery {
    fn from(params: &QueryParams) -> Self {
        Self {
            q: params.q.clone(),
            page: params.page,
            queue: params.selected_queue.clone(),
            status: params.selected_status,
            sort_column: params.sort_column,
            sort_direction: params.sort_direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsQuery {
    pub window: ReportingWindow,
    pub queue: Option<String>,
    pub status: Option<JobStatus>,
}

impl StatsQuery {
    /// `start`/`end` go out as unix seconds.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("start", self.window.start.timestamp().to_string()),
            ("end", self.window.end.timestamp().to_string()),
        ];
        if let Some(queue) = self.queue.as_ref().filter(|q| !q.is_empty()) {
            pairs.push(("queue", queue.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

impl From<&QueryParams> for StatsQuery {
    fn from(params: &QueryParams) -> Self {
        Self {
            window: ReportingWindow::new(params.start_date, params.end_date),
            queue: params.selected_queue.clone(),
            status: params.selected_status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Structured,
    Text,
}

/// The upstream batch scheduler API.
#[async_trait]
pub trait BatchApi: Send + Sync {
    async fn list_jobs(&self, query: &JobListQuery) -> Result<Vec<RawJob>, BatchApiError>;

    async fn get_job(&self, id: &JobId) -> Result<RawJob, BatchApiError>;

    /// Text logs are split into one entry per line so both formats come
    /// back in the same shape.
    async fn get_logs(&self, id: &JobId, format: LogFormat)
    -> Result<Vec<LogEntry>, BatchApiError>;

    async fn get_stats(&self, query: &StatsQuery) -> Result<Vec<StatInterval>, BatchApiError>;

    async fn list_active_queues(&self) -> Result<Vec<String>, BatchApiError>;

    async fn list_all_queues(&self) -> Result<Vec<String>, BatchApiError>;

    async fn set_queue_active(&self, name: &str, active: bool) -> Result<(), BatchApiError>;

    async fn kill_jobs(&self, ids: &[JobId]) -> Result<(), BatchApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BatchApiError {
    #[error("api request failed: {0}")]
    RequestFailed(String),
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl BatchApiError {
    /// The upstream answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BatchApiError::Status { status: 404, .. })
    }
}
