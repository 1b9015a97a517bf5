use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{
    BatchApi, BatchApiError, ConfirmationGate, JobListQuery, LogFormat, StatsQuery,
};
use crate::domain::{Color, Job, JobId, LogEntry, ReportingWindow};

use super::job_lifecycle::{derive_job, derive_jobs};
use super::stats_aggregator::{StatsAggregator, StatsSummary, StatsTableRow};
use super::{ColorRegistry, View, ViewStatusBoard};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueColor {
    pub queue: String,
    pub color: Color,
}

/// Everything the stats page needs for one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub window: ReportingWindow,
    pub summary: StatsSummary,
    pub table: Vec<StatsTableRow>,
    pub colors: Vec<QueueColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    Killed(usize),
    /// The user did not confirm; no request was sent.
    Declined,
}

/// Fetches from the upstream API and runs the results through the job
/// deriver and the stats aggregator. Fetch failures land on the view status
/// board rather than being returned.
pub struct DashboardService<A: ?Sized> {
    api: Arc<A>,
    aggregator: StatsAggregator,
    colors: Arc<ColorRegistry>,
    statuses: Arc<ViewStatusBoard>,
}

impl<A> DashboardService<A>
where
    A: BatchApi + ?Sized,
{
    pub fn new(
        api: Arc<A>,
        aggregator: StatsAggregator,
        colors: Arc<ColorRegistry>,
        statuses: Arc<ViewStatusBoard>,
    ) -> Self {
        Self {
            api,
            aggregator,
            colors,
            statuses,
        }
    }

    pub fn statuses(&self) -> &ViewStatusBoard {
        &self.statuses
    }

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    #[tracing::instrument(skip(self, query, now), fields(page = query.page))]
    pub async fn list_jobs(&self, query: &JobListQuery, now: DateTime<Utc>) -> Option<Vec<Job>> {
        let raws = self
            .statuses
            .track(View::Jobs, self.api.list_jobs(query))
            .await?;
        tracing::debug!(count = raws.len(), "Fetched jobs");
        Some(derive_jobs(&raws, now))
    }

    #[tracing::instrument(skip(self, now), fields(job_id = %id))]
    pub async fn get_job(&self, id: &JobId, now: DateTime<Utc>) -> Result<Job, BatchApiError> {
        let raw = self.statuses.record(View::Job, self.api.get_job(id)).await?;
        Ok(derive_job(&raw, now))
    }

    #[tracing::instrument(skip(self), fields(job_id = %id))]
    pub async fn get_logs(&self, id: &JobId, format: LogFormat) -> Option<Vec<LogEntry>> {
        self.statuses
            .track(View::Logs, self.api.get_logs(id, format))
            .await
    }

    #[tracing::instrument(skip(self, query), fields(start = %query.window.start, end = %query.window.end))]
    pub async fn get_stats(&self, query: &StatsQuery) -> Option<StatsReport> {
        let rows = self
            .statuses
            .track(View::Stats, self.api.get_stats(query))
            .await?;

        let summary = self.aggregator.aggregate(&rows);
        let colors = self
            .colors
            .colors_for(&summary.queue_order)
            .into_iter()
            .map(|(queue, color)| QueueColor { queue, color })
            .collect();
        let table = summary.table_rows(&query.window, &self.colors);

        Some(StatsReport {
            window: query.window,
            summary,
            table,
            colors,
        })
    }

    pub async fn active_queues(&self) -> Option<Vec<String>> {
        self.statuses
            .track(View::JobQueuesActivated, self.api.list_active_queues())
            .await
    }

    pub async fn all_queues(&self) -> Option<Vec<String>> {
        self.statuses
            .track(View::JobQueuesAll, self.api.list_all_queues())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_queue_active(&self, name: &str, active: bool) -> Result<(), BatchApiError> {
        self.api.set_queue_active(name, active).await?;
        tracing::info!(queue = name, active, "Job queue activation changed");
        Ok(())
    }

    /// Kills `ids` after `gate` confirms. Declining is not an error.
    #[tracing::instrument(skip(self, ids, gate), fields(count = ids.len()))]
    pub async fn kill_jobs(
        &self,
        ids: &[JobId],
        gate: &dyn ConfirmationGate,
    ) -> Result<KillOutcome, BatchApiError> {
        let prompt = format!("Are you sure you wish to kill {} jobs?", ids.len());
        if !gate.confirm(&prompt) {
            tracing::info!("Kill request declined");
            return Ok(KillOutcome::Declined);
        }

        self.api.kill_jobs(ids).await?;
        tracing::info!("Kill request sent");
        Ok(KillOutcome::Killed(ids.len()))
    }
}
