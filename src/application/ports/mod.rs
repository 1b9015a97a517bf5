mod batch_api;
mod confirmation_gate;

pub use batch_api::{
    BatchApi, BatchApiError, JOBS_PAGE_SIZE, JobListQuery, LogFormat, StatsQuery,
};
pub use confirmation_gate::{ConfirmationGate, PresetConfirmation};
