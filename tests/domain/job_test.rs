use chrono::{TimeZone, Utc};

use batchdash::application::services::derive_job;
use batchdash::domain::{JobStatus, RawJob};

const RAW_JOB: &str = r#"{
    "id": "a1b2",
    "name": "nightly-etl",
    "status": "SUCCEEDED",
    "desc": "arn:aws:batch:eu-west-1:123456789012:job-definition/etl:3",
    "job_queue": "etl",
    "image": "etl:1.4",
    "created_at": "2024-03-01T10:00:00Z",
    "run_start_time": "2024-03-01T10:05:00Z",
    "stopped_at": "2024-03-01T10:35:00Z",
    "last_updated": "2024-03-01T10:35:01Z",
    "vcpus": 4,
    "memory": 8192,
    "command_line": "[\"python\",\"etl.py\",\"--full\"]",
    "exitcode": 0,
    "array_properties": {
        "size": 3,
        "status_summary": {"succeeded": 2, "failed": 1}
    }
}"#;

fn raw() -> RawJob {
    serde_json::from_str(RAW_JOB).unwrap()
}

#[test]
fn given_upstream_job_json_when_deserializing_then_keeps_raw_timestamps() {
    let raw = raw();

    assert_eq!(raw.status, JobStatus::Succeeded);
    assert_eq!(raw.created_at.as_deref(), Some("2024-03-01T10:00:00Z"));
    assert_eq!(raw.public_ip, None);
    assert!(!raw.termination_requested);
}

#[test]
fn given_array_job_when_counting_children_then_missing_statuses_are_zero() {
    let summary = raw().array_properties.unwrap().status_summary;

    assert_eq!(summary.count(JobStatus::Succeeded), 2);
    assert_eq!(summary.count(JobStatus::Failed), 1);
    assert_eq!(summary.count(JobStatus::Running), 0);
    assert_eq!(
        summary.counts(),
        vec![(JobStatus::Failed, 1), (JobStatus::Succeeded, 2)]
    );
}

#[test]
fn given_batch_arn_description_when_deriving_region_then_reads_region() {
    let now = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
    let job = derive_job(&raw(), now);

    assert_eq!(job.region(), Some("eu-west-1"));
}

#[test]
fn given_task_arn_when_deriving_region_then_prefers_task_arn() {
    let mut raw = raw();
    raw.task_arn = Some("arn:aws:ecs:us-east-2:123456789012:task/abc".to_string());
    let now = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();

    assert_eq!(derive_job(&raw, now).region(), Some("us-east-2"));
}

#[test]
fn given_derived_job_when_serializing_then_durations_are_seconds() {
    let now = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
    let value = serde_json::to_value(derive_job(&raw(), now)).unwrap();

    assert_eq!(value["runtime"], 1800.0);
    assert_eq!(value["total_elapsed_time"], 2100.0);
    assert_eq!(value["command_line"], "python etl.py --full");
    assert_eq!(value["exit_code_explanation"], "success");
    assert_eq!(value["desc"], raw().description.unwrap());
}
