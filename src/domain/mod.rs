mod color;
mod exit_code;
mod job;
mod job_id;
mod job_status;
mod log_entry;
mod query_params;
mod stat_interval;
mod stats_metric;
pub mod time;

pub use color::{CHART_PALETTE, Color};
pub use exit_code::{SIGNAL_EXIT_CODES, explain_exit_code, is_signal_exit};
pub use job::{ArrayProperties, Job, RawJob, StatusSummary};
pub use job_id::JobId;
pub use job_status::{JobStatus, STATUS_ORDER};
pub use log_entry::LogEntry;
pub use query_params::{GraphType, QueryParams, SortColumn, SortDirection};
pub use stat_interval::{Measure, Measures, StatInterval, ratio};
pub use stats_metric::{StatsMetric, lookup_key};
pub use time::ReportingWindow;
