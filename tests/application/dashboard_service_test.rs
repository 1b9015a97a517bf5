use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use batchdash::application::ports::{
    BatchApi, ConfirmationGate, JobListQuery, LogFormat, PresetConfirmation, StatsQuery,
};
use batchdash::application::services::{
    ColorRegistry, DashboardService, KillOutcome, StatsAggregator, View, ViewStatusBoard,
};
use batchdash::domain::{
    JobId, JobStatus, LogEntry, QueryParams, ReportingWindow,
};

use crate::helpers::{MockBatchApi, raw_job, stat};

fn service(api: MockBatchApi) -> (DashboardService<MockBatchApi>, Arc<MockBatchApi>) {
    let api = Arc::new(api);
    let service = DashboardService::new(
        api.clone(),
        StatsAggregator::default(),
        Arc::new(ColorRegistry::new()),
        Arc::new(ViewStatusBoard::new()),
    );
    (service, api)
}

fn job_query() -> JobListQuery {
    let now = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
    JobListQuery::from(&QueryParams::defaults_at(now))
}

fn stats_query() -> StatsQuery {
    StatsQuery {
        window: ReportingWindow::new(
            Utc.timestamp_opt(0, 0).unwrap(),
            Utc.timestamp_opt(3600, 0).unwrap(),
        ),
        queue: None,
        status: None,
    }
}

struct RecordingGate {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ConfirmationGate for RecordingGate {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

#[tokio::test]
async fn given_upstream_jobs_when_listing_then_returns_derived_jobs() {
    let mut failed = raw_job("b", JobStatus::Failed);
    failed.exitcode = Some(143);
    let (service, api) = service(MockBatchApi {
        jobs: vec![raw_job("a", JobStatus::Running), failed],
        ..MockBatchApi::default()
    });

    let jobs = service
        .list_jobs(&job_query(), Utc::now())
        .await
        .unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1].status, JobStatus::Terminated);
    assert_eq!(api.job_queries.lock().unwrap().len(), 1);
    assert!(!service.statuses().status(View::Jobs).error);
}

#[tokio::test]
async fn given_failing_upstream_when_fetching_then_flags_view_and_returns_none() {
    let (service, _api) = service(MockBatchApi::failing());

    assert!(service.list_jobs(&job_query(), Utc::now()).await.is_none());
    assert!(service.get_stats(&stats_query()).await.is_none());
    assert!(
        service
            .get_logs(&JobId::new("a"), LogFormat::Structured)
            .await
            .is_none()
    );

    let statuses = service.statuses();
    assert!(statuses.status(View::Jobs).error);
    assert!(statuses.status(View::Stats).error);
    assert!(statuses.status(View::Logs).error);
    assert!(!statuses.status(View::JobQueuesAll).error);
}

#[tokio::test]
async fn given_unknown_job_when_fetching_then_reports_not_found_and_flags_job_view() {
    let (service, _api) = service(MockBatchApi::default());

    let error = service
        .get_job(&JobId::new("missing"), Utc::now())
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    assert!(service.statuses().status(View::Job).error);
}

#[tokio::test]
async fn given_logs_when_fetching_then_passes_them_through() {
    let (service, _api) = service(MockBatchApi {
        logs: vec![LogEntry::new("one"), LogEntry::new("two")],
        ..MockBatchApi::default()
    });

    let logs = service
        .get_logs(&JobId::new("a"), LogFormat::Text)
        .await
        .unwrap();

    assert_eq!(logs.len(), 2);
}

#[tokio::test]
async fn given_stat_rows_when_fetching_stats_then_colors_follow_queue_order() {
    let (service, _api) = service(MockBatchApi {
        stats: vec![
            stat(0, "small", JobStatus::Succeeded, 1.0, 1.0, 1.0, 1),
            stat(0, "big", JobStatus::Succeeded, 50.0, 1.0, 10.0, 1),
        ],
        ..MockBatchApi::default()
    });

    let report = service.get_stats(&stats_query()).await.unwrap();

    assert_eq!(report.summary.queue_order, vec!["big", "small"]);
    assert_eq!(report.colors[0].queue, "big");
    assert_eq!(report.colors[0].color, service.colors().color_for("big"));
    assert_eq!(report.table.len(), 3);
    assert_eq!(report.window, stats_query().window);
}

#[tokio::test]
async fn given_declined_confirmation_when_killing_then_sends_nothing() {
    let (service, api) = service(MockBatchApi::default());
    let gate = RecordingGate {
        answer: false,
        prompts: Mutex::new(Vec::new()),
    };

    let outcome = service
        .kill_jobs(&[JobId::new("a"), JobId::new("b")], &gate)
        .await
        .unwrap();

    assert_eq!(outcome, KillOutcome::Declined);
    assert!(api.killed.lock().unwrap().is_empty());
    assert_eq!(
        gate.prompts.lock().unwrap().as_slice(),
        ["Are you sure you wish to kill 2 jobs?"]
    );
}

#[tokio::test]
async fn given_confirmed_kill_when_killing_then_sends_ids() {
    let (service, api) = service(MockBatchApi::default());
    let ids = [JobId::new("a"), JobId::new("b"), JobId::new("c")];

    let outcome = service
        .kill_jobs(&ids, &PresetConfirmation(true))
        .await
        .unwrap();

    assert_eq!(outcome, KillOutcome::Killed(3));
    assert_eq!(api.killed.lock().unwrap().as_slice(), &ids);
}

#[tokio::test]
async fn given_failing_upstream_when_killing_then_returns_error() {
    let (service, _api) = service(MockBatchApi::failing());

    let result = service
        .kill_jobs(&[JobId::new("a")], &PresetConfirmation(true))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_queue_when_toggling_activation_then_forwards_to_upstream() {
    let (service, api) = service(MockBatchApi {
        queues: vec!["gpu".to_string()],
        ..MockBatchApi::default()
    });

    service.set_queue_active("gpu", false).await.unwrap();
    service.set_queue_active("gpu", true).await.unwrap();

    assert_eq!(
        api.activations.lock().unwrap().as_slice(),
        [("gpu".to_string(), false), ("gpu".to_string(), true)]
    );
    assert_eq!(service.all_queues().await.unwrap(), vec!["gpu"]);
    assert_eq!(service.active_queues().await.unwrap(), vec!["gpu"]);
}

#[tokio::test]
async fn given_trait_object_api_when_building_service_then_works_through_dyn() {
    let api: Arc<dyn BatchApi> = Arc::new(MockBatchApi {
        queues: vec!["default".to_string()],
        ..MockBatchApi::default()
    });
    let service = DashboardService::new(
        api,
        StatsAggregator::default(),
        Arc::new(ColorRegistry::new()),
        Arc::new(ViewStatusBoard::new()),
    );

    assert_eq!(service.active_queues().await.unwrap(), vec!["default"]);
}

#[tokio::test]
async fn given_unreachable_upstream_when_fetching_job_then_error_is_not_a_missing_job() {
    let (service, _api) = service(MockBatchApi::failing());

    let error = service
        .get_job(&JobId::new("a"), Utc::now())
        .await
        .unwrap_err();

    assert!(!error.is_not_found());
}
