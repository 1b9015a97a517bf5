use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ports::StatsQuery;
use crate::application::services::View;
use crate::domain::QueryParams;
use crate::presentation::state::AppState;

use super::error::{ErrorResponse, fetch_failed};

#[tracing::instrument(skip(state))]
pub async fn stats_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let defaults = QueryParams::defaults_at(state.now());
    let params = QueryParams::decode(query.as_deref().unwrap_or_default(), &defaults);

    if params.end_date <= params.start_date {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "endDate must be after startDate".to_string(),
                view: Some(View::Stats),
            }),
        )
            .into_response();
    }

    match state.dashboard.get_stats(&StatsQuery::from(&params)).await {
        Some(report) => (StatusCode::OK, Json(report)).into_response(),
        None => fetch_failed(View::Stats),
    }
}
