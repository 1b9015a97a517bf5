use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::time::{elapsed, parse_timestamp};
use crate::domain::{Job, JobStatus, RawJob, explain_exit_code, is_signal_exit};

/// A timestamp field as far as branch selection is concerned: `None` when the
/// upstream left it out, `Some(None)` when it is present but unparseable.
type Field = Option<Option<DateTime<Utc>>>;

struct Timestamps {
    created_at: Field,
    run_start_time: Field,
    stopped_at: Field,
    last_updated: Field,
}

impl Timestamps {
    fn from_raw(raw: &RawJob) -> Self {
        Self {
            created_at: field(raw, "created_at", raw.created_at.as_deref()),
            run_start_time: field(raw, "run_start_time", raw.run_start_time.as_deref()),
            stopped_at: field(raw, "stopped_at", raw.stopped_at.as_deref()),
            last_updated: field(raw, "last_updated", raw.last_updated.as_deref()),
        }
    }
}

fn field(raw: &RawJob, name: &'static str, value: Option<&str>) -> Field {
    let value = value.filter(|v| !v.trim().is_empty())?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        tracing::debug!(job_id = %raw.id, field = name, value, "Unparseable job timestamp");
    }
    Some(parsed)
}

fn span(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Option<TimeDelta> {
    Some(elapsed(from?, to?))
}

/// FAILED jobs killed by a signal are shown as TERMINATED. No other status is
/// rewritten.
pub fn reclassify_status(status: JobStatus, exitcode: Option<i64>) -> JobStatus {
    match (status, exitcode) {
        (JobStatus::Failed, Some(code)) if is_signal_exit(code) => JobStatus::Terminated,
        _ => status,
    }
}

/// Time the job actually spent executing, excluding queue wait.
fn runtime(t: &Timestamps, status: JobStatus, now: DateTime<Utc>) -> Option<TimeDelta> {
    if let (Some(stopped_at), Some(run_start_time)) = (t.stopped_at, t.run_start_time) {
        return span(run_start_time, stopped_at);
    }

    if let Some(run_start_time) = t.run_start_time {
        if !status.is_finished() {
            return span(run_start_time, Some(now));
        }
        return span(run_start_time, t.last_updated.flatten());
    }

    // The scheduler may not fill in run_start_time until the job finishes;
    // estimate from last_updated until it does.
    if status == JobStatus::Running {
        return span(t.last_updated.flatten(), Some(now));
    }

    None
}

/// Time spent queued plus running.
fn total_elapsed_time(t: &Timestamps, status: JobStatus, now: DateTime<Utc>) -> Option<TimeDelta> {
    let created_at = t.created_at?;

    if let Some(stopped_at) = t.stopped_at {
        return span(created_at, stopped_at);
    }

    // Jobs that never started have no stopped_at.
    if status.is_finished() {
        return span(created_at, t.last_updated.flatten());
    }

    span(created_at, Some(now))
}

/// Decodes the JSON-encoded argv into a single space-separated command line.
/// Anything other than a JSON string array yields an empty string.
pub fn decode_command_line(raw: Option<&str>) -> String {
    raw.and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
        .map(|argv| argv.join(" "))
        .unwrap_or_default()
}

/// Builds the enriched job record for `raw` as of `now`.
///
/// Pure: the raw record is left untouched and the result only depends on the
/// arguments. Terminal jobs with `stopped_at` (and `run_start_time` for the
/// runtime) produce the same durations whatever `now` is.
pub fn derive_job(raw: &RawJob, now: DateTime<Utc>) -> Job {
    let status = reclassify_status(raw.status, raw.exitcode);
    let timestamps = Timestamps::from_raw(raw);

    Job {
        id: raw.id.clone(),
        name: raw.name.clone(),
        status,
        description: raw.description.clone(),
        job_queue: raw.job_queue.clone(),
        image: raw.image.clone(),
        last_updated: timestamps.last_updated.flatten(),
        created_at: timestamps.created_at.flatten(),
        run_start_time: timestamps.run_start_time.flatten(),
        stopped_at: timestamps.stopped_at.flatten(),
        vcpus: raw.vcpus,
        memory: raw.memory,
        timeout: raw.timeout,
        command_line: decode_command_line(raw.command_line.as_deref()),
        status_reason: raw.status_reason.clone(),
        exitcode: raw.exitcode,
        exit_code_explanation: raw.exitcode.and_then(explain_exit_code),
        log_stream_name: raw.log_stream_name.clone(),
        termination_requested: raw.termination_requested,
        task_arn: raw.task_arn.clone(),
        instance_id: raw.instance_id.clone(),
        public_ip: raw.public_ip.clone(),
        private_ip: raw.private_ip.clone(),
        array_properties: raw.array_properties.clone(),
        runtime: runtime(&timestamps, status, now),
        total_elapsed_time: total_elapsed_time(&timestamps, status, now),
    }
}

pub fn derive_jobs(raws: &[RawJob], now: DateTime<Utc>) -> Vec<Job> {
    raws.iter().map(|raw| derive_job(raw, now)).collect()
}
