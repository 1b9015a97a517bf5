use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::BatchApiError;
use crate::application::services::View;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
}

/// The upstream fetch for `view` failed; the view's error flag is already set.
pub fn fetch_failed(view: View) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: format!("Could not load API response for {}", view.as_str().to_lowercase()),
            view: Some(view),
        }),
    )
        .into_response()
}

pub fn upstream_error(error: &BatchApiError) -> Response {
    tracing::error!(error = %error, "Upstream request failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: format!("Upstream request failed: {}", error),
            view: None,
        }),
    )
        .into_response()
}
