use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::ports::LogFormat;
use crate::application::services::View;
use crate::domain::JobId;
use crate::presentation::state::AppState;

use super::error::fetch_failed;
use super::polling::{json_event, poll_stream};

#[derive(Debug, Default, Deserialize)]
pub struct LogsParams {
    pub format: Option<String>,
}

impl LogsParams {
    fn format(&self) -> LogFormat {
        match self.format.as_deref() {
            Some("text") => LogFormat::Text,
            _ => LogFormat::Structured,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn logs_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(params): Query<LogsParams>,
) -> Response {
    let id = JobId::new(job_id);

    match state.dashboard.get_logs(&id, params.format()).await {
        Some(entries) => (StatusCode::OK, Json(entries)).into_response(),
        None => fetch_failed(View::Logs),
    }
}

/// Tails a job's logs by re-fetching them on the log poll interval.
pub async fn logs_stream_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(params): Query<LogsParams>,
) -> impl IntoResponse {
    let id = JobId::new(job_id);
    let format = params.format();
    let period = state.settings.polling.logs_interval();

    poll_stream("logs_tail", period, move || {
        let state = state.clone();
        let id = id.clone();
        async move {
            let entries = state.dashboard.get_logs(&id, format).await;
            json_event("logs", entries.as_ref())
        }
    })
}
