mod color_registry;
mod dashboard_service;
pub mod job_lifecycle;
mod periodic_task;
mod stats_aggregator;
mod view_status;

pub use color_registry::ColorRegistry;
pub use dashboard_service::{DashboardService, KillOutcome, QueueColor, StatsReport};
pub use job_lifecycle::{decode_command_line, derive_job, derive_jobs, reclassify_status};
pub use periodic_task::PeriodicTask;
pub use stats_aggregator::{
    AverageBasis, ChartPoint, QueuePoint, StatsAggregator, StatsSummary, StatsTableRow, TableView,
};
pub use view_status::{View, ViewStatus, ViewStatusBoard};
