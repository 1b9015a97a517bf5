mod error;
mod health;
mod jobs;
mod logs;
mod polling;
mod queues;
mod session;
mod stats;

pub use error::ErrorResponse;
pub use health::health_handler;
pub use jobs::{
    KillJobsRequest, NEXT_PAGE_HEADER, get_job_handler, jobs_stream_handler, kill_jobs_handler,
    list_jobs_handler,
};
pub use logs::{logs_handler, logs_stream_handler};
pub use queues::{
    activate_queue_handler, active_queues_handler, all_queues_handler, deactivate_queue_handler,
};
pub use session::session_handler;
pub use stats::stats_handler;
