use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::{JobId, JobStatus, StatsMetric};

const DEFAULT_STATS_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortColumn {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "command")]
    Command,
    #[serde(rename = "startTime")]
    StartTime,
    #[serde(rename = "creationTime")]
    CreationTime,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::Container => "container",
            SortColumn::Command => "command",
            SortColumn::StartTime => "startTime",
            SortColumn::CreationTime => "creationTime",
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortColumn::Id),
            "name" => Ok(SortColumn::Name),
            "container" => Ok(SortColumn::Container),
            "command" => Ok(SortColumn::Command),
            "startTime" => Ok(SortColumn::StartTime),
            "creationTime" => Ok(SortColumn::CreationTime),
            _ => Err(format!("Invalid sort column: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Area,
    Bar,
}

impl GraphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphType::Area => "area",
            GraphType::Bar => "bar",
        }
    }
}

impl FromStr for GraphType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(GraphType::Area),
            "bar" => Ok(GraphType::Bar),
            _ => Err(format!("Invalid graph type: {}", s)),
        }
    }
}

/// Dashboard session state, persisted in the page URL.
///
/// Only fields that differ from their defaults are written to the query
/// string, so the "no filters" state encodes to an empty string. `None` for
/// the queue or status selection means "all".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub q: String,
    pub page: u32,
    pub selected_queue: Option<String>,
    pub selected_status: Option<JobStatus>,
    pub selected_ids: Vec<JobId>,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub stats_metric: StatsMetric,
    pub graph_type: GraphType,
}

impl QueryParams {
    /// Defaults for a session opened at `now`: the last seven days of stats,
    /// newest jobs first.
    pub fn defaults_at(now: DateTime<Utc>) -> Self {
        let end_date = now.trunc_subsecs(0);
        Self {
            q: String::new(),
            page: 0,
            selected_queue: None,
            selected_status: None,
            selected_ids: Vec::new(),
            sort_column: SortColumn::StartTime,
            sort_direction: SortDirection::Desc,
            start_date: end_date - Duration::days(DEFAULT_STATS_WINDOW_DAYS),
            end_date,
            stats_metric: StatsMetric::AvgVcpu,
            graph_type: GraphType::Area,
        }
    }

    /// Form-urlencoded query string (without `?`), keys in ascending order.
    pub fn encode(&self, defaults: &QueryParams) -> String {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();

        if self.end_date != defaults.end_date {
            pairs.push(("endDate", self.end_date.timestamp().to_string()));
        }
        if self.graph_type != defaults.graph_type {
            pairs.push(("graphType", self.graph_type.as_str().to_string()));
        }
        if self.page != defaults.page {
            pairs.push(("page", self.page.to_string()));
        }
        if self.q != defaults.q {
            pairs.push(("q", self.q.clone()));
        }
        let ids = join_ids(&self.selected_ids);
        if ids != join_ids(&defaults.selected_ids) {
            pairs.push(("selectedIds", ids));
        }
        if self.selected_queue != defaults.selected_queue {
            pairs.push((
                "selectedQueue",
                self.selected_queue.clone().unwrap_or_default(),
            ));
        }
        if self.selected_status != defaults.selected_status {
            pairs.push((
                "selectedStatus",
                self.selected_status
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
            ));
        }
        if self.sort_column != defaults.sort_column {
            pairs.push(("sortColumn", self.sort_column.as_str().to_string()));
        }
        if self.sort_direction != defaults.sort_direction {
            pairs.push(("sortDirection", self.sort_direction.as_str().to_string()));
        }
        if self.start_date != defaults.start_date {
            pairs.push(("startDate", self.start_date.timestamp().to_string()));
        }
        if self.stats_metric != defaults.stats_metric {
            pairs.push(("statsMetric", self.stats_metric.as_str().to_string()));
        }

        pairs.sort_by_key(|(key, _)| *key);

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Parses a query string. Missing keys and values that fail to parse
    /// fall back to `defaults`; an empty or `all` queue/status selection
    /// means "all".
    pub fn decode(query: &str, defaults: &QueryParams) -> QueryParams {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = defaults.clone();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => params.q = value.into_owned(),
                "page" => params.page = value.parse().unwrap_or(defaults.page),
                "selectedQueue" => {
                    params.selected_queue = match value.as_ref() {
                        "" | "all" => None,
                        queue => Some(queue.to_string()),
                    }
                }
                "selectedStatus" => {
                    params.selected_status = match value.as_ref() {
                        "" | "all" => None,
                        status => status.parse().ok().or(defaults.selected_status),
                    }
                }
                "selectedIds" => {
                    params.selected_ids = value
                        .split(',')
                        .filter(|id| !id.is_empty())
                        .map(JobId::new)
                        .collect()
                }
                "sortColumn" => {
                    params.sort_column = value.parse().unwrap_or(defaults.sort_column)
                }
                "sortDirection" => {
                    params.sort_direction = value.parse().unwrap_or(defaults.sort_direction)
                }
                "startDate" => {
                    params.start_date = parse_unix_seconds(&value).unwrap_or(defaults.start_date)
                }
                "endDate" => {
                    params.end_date = parse_unix_seconds(&value).unwrap_or(defaults.end_date)
                }
                "statsMetric" => {
                    params.stats_metric = value.parse().unwrap_or(defaults.stats_metric)
                }
                "graphType" => params.graph_type = value.parse().unwrap_or(defaults.graph_type),
                _ => {}
            }
        }

        params
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "q={:?} page={} queue={} status={} sort={} {}",
            self.q,
            self.page,
            self.selected_queue.as_deref().unwrap_or("all"),
            self.selected_status.map(|s| s.as_str()).unwrap_or("all"),
            self.sort_column.as_str(),
            self.sort_direction.as_str()
        )
    }
}

fn join_ids(ids: &[JobId]) -> String {
    ids.iter().map(JobId::as_str).collect::<Vec<_>>().join(",")
}

fn parse_unix_seconds(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
