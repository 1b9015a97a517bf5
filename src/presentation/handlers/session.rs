use axum::Json;
use axum::extract::{RawQuery, State};
use serde::Serialize;

use crate::domain::QueryParams;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    /// Canonical query string: only non-default fields, empty for defaults.
    pub query: String,
    pub params: QueryParams,
}

/// Normalizes a dashboard URL query into its canonical form.
pub async fn session_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<SessionResponse> {
    let defaults = QueryParams::defaults_at(state.now());
    let params = QueryParams::decode(query.as_deref().unwrap_or_default(), &defaults);

    Json(SessionResponse {
        query: params.encode(&defaults),
        params,
    })
}
