use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    activate_queue_handler, active_queues_handler, all_queues_handler, deactivate_queue_handler,
    get_job_handler, health_handler, jobs_stream_handler, kill_jobs_handler, list_jobs_handler,
    logs_handler, logs_stream_handler, session_handler, stats_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route("/jobs", get(list_jobs_handler))
        .route("/jobs/stream", get(jobs_stream_handler))
        .route("/jobs/kill", post(kill_jobs_handler))
        .route("/jobs/{job_id}", get(get_job_handler))
        .route("/jobs/{job_id}/logs", get(logs_handler))
        .route("/jobs/{job_id}/logs/stream", get(logs_stream_handler))
        .route("/stats", get(stats_handler))
        .route("/job_queues/active", get(active_queues_handler))
        .route("/job_queues/all", get(all_queues_handler))
        .route("/job_queues/{name}/activate", post(activate_queue_handler))
        .route("/job_queues/{name}/deactivate", post(deactivate_queue_handler))
        .route("/session", get(session_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
