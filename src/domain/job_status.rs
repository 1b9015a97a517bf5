use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Submitted,
    Pending,
    Runnable,
    Starting,
    Running,
    Failed,
    Succeeded,
    Gone,
    Terminated,
}

/// Lifecycle order used when listing per-status child counts of array jobs.
pub const STATUS_ORDER: [JobStatus; 8] = [
    JobStatus::Submitted,
    JobStatus::Pending,
    JobStatus::Runnable,
    JobStatus::Starting,
    JobStatus::Running,
    JobStatus::Failed,
    JobStatus::Succeeded,
    JobStatus::Gone,
];

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::Pending => "PENDING",
            JobStatus::Runnable => "RUNNABLE",
            JobStatus::Starting => "STARTING",
            JobStatus::Running => "RUNNING",
            JobStatus::Failed => "FAILED",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Gone => "GONE",
            JobStatus::Terminated => "TERMINATED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "Submitted",
            JobStatus::Pending => "Pending",
            JobStatus::Runnable => "Runnable",
            JobStatus::Starting => "Starting",
            JobStatus::Running => "Running",
            JobStatus::Failed => "Failed",
            JobStatus::Succeeded => "Succeeded",
            JobStatus::Gone => "Gone",
            JobStatus::Terminated => "Terminated",
        }
    }

    /// Terminal statuses: no further transitions are expected.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStatus::Failed | JobStatus::Succeeded | JobStatus::Gone | JobStatus::Terminated
        )
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBMITTED" => Ok(JobStatus::Submitted),
            "PENDING" => Ok(JobStatus::Pending),
            "RUNNABLE" => Ok(JobStatus::Runnable),
            "STARTING" => Ok(JobStatus::Starting),
            "RUNNING" => Ok(JobStatus::Running),
            "FAILED" => Ok(JobStatus::Failed),
            "SUCCEEDED" => Ok(JobStatus::Succeeded),
            "GONE" => Ok(JobStatus::Gone),
            "TERMINATED" => Ok(JobStatus::Terminated),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
