use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::View;
use crate::presentation::state::AppState;

use super::error::{fetch_failed, upstream_error};

pub async fn active_queues_handler(State(state): State<AppState>) -> Response {
    match state.dashboard.active_queues().await {
        Some(queues) => (StatusCode::OK, Json(queues)).into_response(),
        None => fetch_failed(View::JobQueuesActivated),
    }
}

pub async fn all_queues_handler(State(state): State<AppState>) -> Response {
    match state.dashboard.all_queues().await {
        Some(queues) => (StatusCode::OK, Json(queues)).into_response(),
        None => fetch_failed(View::JobQueuesAll),
    }
}

async fn set_active(state: AppState, name: String, active: bool) -> Response {
    match state.dashboard.set_queue_active(&name, active).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => upstream_error(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn activate_queue_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    set_active(state, name, true).await
}

#[tracing::instrument(skip(state))]
pub async fn deactivate_queue_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    set_active(state, name, false).await
}
