use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::application::services::ColorRegistry;
use crate::domain::{
    Color, JobStatus, Measure, Measures, ReportingWindow, StatInterval, StatsMetric, lookup_key,
};

/// Denominator for the per-point `avg_vcpu` / `avg_memory` chart metrics.
///
/// Two definitions have been in use: dividing by the summed
/// `instance_seconds` of the `(timestamp, queue)` point, and dividing by the
/// bucket width. They disagree whenever a queue only ran for part of a
/// bucket. `InstanceSeconds` is the current definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageBasis {
    #[default]
    InstanceSeconds,
    Interval,
}

/// One queue's values at one chart timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueuePoint {
    pub measures: Measures,
    /// `None` means "no data" (zero denominator), never zero.
    pub avg_vcpu: Option<f64>,
    pub avg_memory: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub timestamp: i64,
    pub queues: BTreeMap<String, QueuePoint>,
}

impl ChartPoint {
    /// Value plotted for `queue` under `metric`, `None` when there is no data.
    pub fn value(&self, queue: &str, metric: StatsMetric) -> Option<f64> {
        let point = self.queues.get(queue)?;
        match metric.measure() {
            Some(measure) => Some(point.measures.get(measure)),
            None if metric == StatsMetric::AvgVcpu => point.avg_vcpu,
            None => point.avg_memory,
        }
    }
}

/// Flattened to `{"timestamp": t, "<queue>_<metric>": v, ...}`. Averages
/// without data are left out rather than written as zero.
impl Serialize for ChartPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        for (queue, point) in &self.queues {
            for measure in Measure::ALL {
                map.serialize_entry(
                    &lookup_key(queue, measure.as_str()),
                    &point.measures.get(measure),
                )?;
            }
            if let Some(avg_vcpu) = point.avg_vcpu {
                map.serialize_entry(
                    &lookup_key(queue, StatsMetric::AvgVcpu.as_str()),
                    &avg_vcpu,
                )?;
            }
            if let Some(avg_memory) = point.avg_memory {
                map.serialize_entry(
                    &lookup_key(queue, StatsMetric::AvgMemory.as_str()),
                    &avg_memory,
                )?;
            }
        }
        map.end()
    }
}

/// Per-queue, per-status sums across all timestamps.
pub type TableView = BTreeMap<String, BTreeMap<JobStatus, Measures>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub chart_series: Vec<ChartPoint>,
    pub table_view: TableView,
    pub totals: Measures,
    /// Queues by descending total `vcpu_seconds`, ties by name. Drives both
    /// chart stacking and table row order.
    pub queue_order: Vec<String>,
}

/// One row of the summary table, ratios already evaluated against the
/// reporting window. Ratios with a zero denominator are NaN (`null` in JSON).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsTableRow {
    pub label: String,
    pub status: Option<JobStatus>,
    pub color: Color,
    #[serde(flatten)]
    pub measures: Measures,
    pub avg_job_duration: f64,
    pub avg_vcpu: f64,
    pub avg_memory_gb: f64,
    pub vcpu_rate: f64,
    pub memory_rate_gb: f64,
    pub job_rate_per_hour: f64,
}

impl StatsTableRow {
    fn new(
        label: String,
        status: Option<JobStatus>,
        color: Color,
        measures: Measures,
        window_seconds: f64,
    ) -> Self {
        Self {
            label,
            status,
            color,
            avg_job_duration: measures.avg_job_duration(),
            avg_vcpu: measures.avg_vcpu(),
            avg_memory_gb: measures.avg_memory_gb(),
            vcpu_rate: measures.vcpu_rate(window_seconds),
            memory_rate_gb: measures.memory_rate_gb(window_seconds),
            job_rate_per_hour: measures.job_rate_per_hour(window_seconds),
            measures,
        }
    }
}

impl StatsSummary {
    pub fn is_empty(&self) -> bool {
        self.queue_order.is_empty()
    }

    /// Summary table rows: queues in `queue_order`, statuses by descending
    /// name within a queue, then a "Total" row when there is any data.
    ///
    /// Colors are requested in `queue_order`, so a fresh registry hands out
    /// the same colors for the same data.
    pub fn table_rows(&self, window: &ReportingWindow, colors: &ColorRegistry) -> Vec<StatsTableRow> {
        let window_seconds = window.elapsed_seconds();
        let mut rows = Vec::new();

        for queue in &self.queue_order {
            let color = colors.color_for(queue);
            let Some(statuses) = self.table_view.get(queue) else {
                continue;
            };
            let mut statuses: Vec<_> = statuses.iter().collect();
            statuses.sort_by(|(a, _), (b, _)| b.as_str().cmp(a.as_str()));

            for (status, measures) in statuses {
                rows.push(StatsTableRow::new(
                    queue.clone(),
                    Some(*status),
                    color,
                    *measures,
                    window_seconds,
                ));
            }
        }

        if !self.is_empty() {
            rows.push(StatsTableRow::new(
                "Total".to_string(),
                None,
                Color::BLACK,
                self.totals,
                window_seconds,
            ));
        }

        rows
    }
}

#[derive(Default)]
struct Bucket {
    measures: Measures,
    widest_interval: i64,
}

/// Reshapes flat stat intervals into the chart, table and total views.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator {
    basis: AverageBasis,
}

impl StatsAggregator {
    pub fn new(basis: AverageBasis) -> Self {
        Self { basis }
    }

    pub fn basis(&self) -> AverageBasis {
        self.basis
    }

    /// Aggregates `rows` in one pass. The result does not depend on the
    /// order of `rows`, and every row is counted exactly once in each view.
    ///
    /// Rows are summed in a canonical order: float addition is not
    /// associative, so arrival order would otherwise leak into every sum and
    /// into `queue_order`.
    pub fn aggregate(&self, rows: &[StatInterval]) -> StatsSummary {
        let mut rows: Vec<&StatInterval> = rows.iter().collect();
        rows.sort_by(|a, b| canonical_order(a, b));

        let mut buckets: BTreeMap<i64, BTreeMap<String, Bucket>> = BTreeMap::new();
        let mut table_view = TableView::new();
        let mut totals = Measures::default();
        let mut weights: HashMap<&str, f64> = HashMap::new();

        for row in rows.iter().copied() {
            *weights.entry(row.job_queue.as_str()).or_default() += row.measures.vcpu_seconds;

            let bucket = buckets
                .entry(row.timestamp)
                .or_default()
                .entry(row.job_queue.clone())
                .or_default();
            bucket.measures.add(&row.measures);
            bucket.widest_interval = bucket.widest_interval.max(row.interval);

            table_view
                .entry(row.job_queue.clone())
                .or_default()
                .entry(row.status)
                .or_default()
                .add(&row.measures);

            totals.add(&row.measures);
        }

        let chart_series = buckets
            .into_iter()
            .map(|(timestamp, queues)| ChartPoint {
                timestamp,
                queues: queues
                    .into_iter()
                    .map(|(queue, bucket)| (queue, self.point(bucket)))
                    .collect(),
            })
            .collect::<Vec<_>>();

        let mut ordered: Vec<(&str, f64)> = weights.into_iter().collect();
        ordered.sort_by(|(a_name, a_weight), (b_name, b_weight)| {
            b_weight.total_cmp(a_weight).then_with(|| a_name.cmp(b_name))
        });
        let queue_order = ordered
            .into_iter()
            .map(|(queue, _)| queue.to_string())
            .collect::<Vec<_>>();

        tracing::debug!(
            rows = rows.len(),
            points = chart_series.len(),
            queues = queue_order.len(),
            basis = ?self.basis,
            "Aggregated stat intervals"
        );

        StatsSummary {
            chart_series,
            table_view,
            totals,
            queue_order,
        }
    }

    fn point(&self, bucket: Bucket) -> QueuePoint {
        let denominator = match self.basis {
            AverageBasis::InstanceSeconds => bucket.measures.instance_seconds,
            AverageBasis::Interval => bucket.widest_interval as f64,
        };
        let average = |numerator: f64| (denominator > 0.0).then(|| numerator / denominator);

        QueuePoint {
            avg_vcpu: average(bucket.measures.vcpu_seconds),
            avg_memory: average(bucket.measures.memory_seconds),
            measures: bucket.measures,
        }
    }
}

/// Total order over stat rows: the bucket key, then every measure.
fn canonical_order(a: &StatInterval, b: &StatInterval) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.job_queue.cmp(&b.job_queue))
        .then_with(|| a.status.cmp(&b.status))
        .then_with(|| a.measures.vcpu_seconds.total_cmp(&b.measures.vcpu_seconds))
        .then_with(|| a.measures.memory_seconds.total_cmp(&b.measures.memory_seconds))
        .then_with(|| a.measures.instance_seconds.total_cmp(&b.measures.instance_seconds))
        .then_with(|| a.measures.job_count.cmp(&b.measures.job_count))
        .then_with(|| a.interval.cmp(&b.interval))
}
