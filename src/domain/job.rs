use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::{JobId, JobStatus, STATUS_ORDER};
use super::time::as_seconds_f64;

/// Job record as the upstream scheduler API returns it.
///
/// Timestamps stay raw strings here so a malformed value degrades to a null
/// derived field instead of rejecting the whole payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawJob {
    pub id: JobId,
    #[serde(default)]
    pub name: String,
    pub status: JobStatus,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub job_queue: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub stopped_at: Option<String>,
    #[serde(default)]
    pub vcpus: Option<i64>,
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub timeout: Option<i64>,
    #[serde(default)]
    pub command_line: Option<String>,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default)]
    pub run_start_time: Option<String>,
    #[serde(default)]
    pub exitcode: Option<i64>,
    #[serde(default)]
    pub log_stream_name: Option<String>,
    #[serde(default)]
    pub termination_requested: bool,
    #[serde(default)]
    pub task_arn: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub private_ip: Option<String>,
    #[serde(default)]
    pub array_properties: Option<ArrayProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayProperties {
    pub size: i64,
    pub status_summary: StatusSummary,
}

/// Child job counts of an array job, keyed by lower-case status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSummary {
    pub submitted: i64,
    pub pending: i64,
    pub runnable: i64,
    pub starting: i64,
    pub running: i64,
    pub failed: i64,
    pub succeeded: i64,
}

impl StatusSummary {
    pub fn count(&self, status: JobStatus) -> i64 {
        match status {
            JobStatus::Submitted => self.submitted,
            JobStatus::Pending => self.pending,
            JobStatus::Runnable => self.runnable,
            JobStatus::Starting => self.starting,
            JobStatus::Running => self.running,
            JobStatus::Failed => self.failed,
            JobStatus::Succeeded => self.succeeded,
            JobStatus::Gone | JobStatus::Terminated => 0,
        }
    }

    /// Non-zero child counts in lifecycle order.
    pub fn counts(&self) -> Vec<(JobStatus, i64)> {
        STATUS_ORDER
            .into_iter()
            .map(|status| (status, self.count(status)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Enriched job record handed to the job list and job detail views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub status: JobStatus,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub job_queue: String,
    pub image: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub run_start_time: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub vcpus: Option<i64>,
    pub memory: Option<i64>,
    pub timeout: Option<i64>,
    pub command_line: String,
    pub status_reason: Option<String>,
    pub exitcode: Option<i64>,
    pub exit_code_explanation: Option<&'static str>,
    pub log_stream_name: Option<String>,
    pub termination_requested: bool,
    pub task_arn: Option<String>,
    pub instance_id: Option<String>,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    pub array_properties: Option<ArrayProperties>,
    #[serde(serialize_with = "serialize_seconds")]
    pub runtime: Option<TimeDelta>,
    #[serde(serialize_with = "serialize_seconds")]
    pub total_elapsed_time: Option<TimeDelta>,
}

impl Job {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// AWS region the job ran in, taken from the task ARN or, failing that,
    /// from a job description that is itself a batch ARN.
    pub fn region(&self) -> Option<&str> {
        if let Some(region) = self
            .task_arn
            .as_deref()
            .and_then(|arn| arn.split(':').nth(3))
            .filter(|r| !r.is_empty())
        {
            return Some(region);
        }

        self.description
            .as_deref()
            .and_then(|desc| desc.strip_prefix("arn:aws:batch:"))
            .and_then(|rest| rest.split(':').next())
            .filter(|r| !r.is_empty())
    }
}

fn serialize_seconds<S>(value: &Option<TimeDelta>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(delta) => serializer.serialize_f64(as_seconds_f64(*delta)),
        None => serializer.serialize_none(),
    }
}
