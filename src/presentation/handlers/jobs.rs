use axum::Json;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{JobListQuery, PresetConfirmation};
use crate::application::services::{KillOutcome, View};
use crate::domain::{JobId, QueryParams};
use crate::presentation::state::AppState;

use super::error::{ErrorResponse, fetch_failed, upstream_error};
use super::polling::{json_event, poll_stream};

pub const NEXT_PAGE_HEADER: &str = "x-next-page";

fn job_list_query(state: &AppState, query: Option<String>) -> JobListQuery {
    let defaults = QueryParams::defaults_at(state.now());
    let params = QueryParams::decode(query.as_deref().unwrap_or_default(), &defaults);
    JobListQuery::from(&params)
}

#[tracing::instrument(skip(state))]
pub async fn list_jobs_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let job_query = job_list_query(&state, query);

    let Some(jobs) = state.dashboard.list_jobs(&job_query, state.now()).await else {
        return fetch_failed(View::Jobs);
    };

    let next_page = job_query.next_page(jobs.len());
    let mut response = (StatusCode::OK, Json(jobs)).into_response();
    if let Some(page) = next_page {
        response
            .headers_mut()
            .insert(NEXT_PAGE_HEADER, HeaderValue::from(page));
    }
    response
}

#[tracing::instrument(skip(state))]
pub async fn get_job_handler(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    let id = JobId::new(job_id);

    match state.dashboard.get_job(&id, state.now()).await {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Job {} not found", id),
                view: Some(View::Job),
            }),
        )
            .into_response(),
        Err(_) => fetch_failed(View::Job),
    }
}

/// Job list re-fetched and re-derived on the auto-refresh interval.
pub async fn jobs_stream_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let job_query = job_list_query(&state, query);
    let period = state.settings.polling.jobs_refresh_interval();

    poll_stream("jobs_refresh", period, move || {
        let state = state.clone();
        let job_query = job_query.clone();
        async move {
            let jobs = state.dashboard.list_jobs(&job_query, state.now()).await;
            json_event("jobs", jobs.as_ref())
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct KillJobsRequest {
    pub ids: Vec<JobId>,
    /// The user's answer to the "are you sure" prompt.
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Serialize)]
pub struct KillJobsResponse {
    pub killed: usize,
}

#[tracing::instrument(skip(state, request), fields(count = request.ids.len()))]
pub async fn kill_jobs_handler(
    State(state): State<AppState>,
    Json(request): Json<KillJobsRequest>,
) -> Response {
    if request.ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No job ids given".to_string(),
                view: None,
            }),
        )
            .into_response();
    }

    let gate = PresetConfirmation(request.confirmed);
    match state.dashboard.kill_jobs(&request.ids, &gate).await {
        Ok(KillOutcome::Killed(killed)) => {
            (StatusCode::OK, Json(KillJobsResponse { killed })).into_response()
        }
        Ok(KillOutcome::Declined) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Kill not confirmed".to_string(),
                view: None,
            }),
        )
            .into_response(),
        Err(e) => upstream_error(&e),
    }
}
