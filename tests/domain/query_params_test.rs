use chrono::{DateTime, Duration, TimeZone, Utc};

use batchdash::domain::{GraphType, JobId, JobStatus, QueryParams, SortColumn, SortDirection, StatsMetric};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap()
}

fn defaults() -> QueryParams {
    QueryParams::defaults_at(now())
}

#[test]
fn given_session_start_when_building_defaults_then_window_is_last_seven_days() {
    let defaults = defaults();

    assert_eq!(defaults.end_date, now());
    assert_eq!(defaults.end_date - defaults.start_date, Duration::days(7));
    assert_eq!(defaults.sort_column, SortColumn::StartTime);
    assert_eq!(defaults.sort_direction, SortDirection::Desc);
    assert_eq!(defaults.stats_metric, StatsMetric::AvgVcpu);
    assert_eq!(defaults.graph_type, GraphType::Area);
    assert_eq!(defaults.selected_queue, None);
}

#[test]
fn given_defaults_when_encoding_then_query_is_empty() {
    let defaults = defaults();
    assert_eq!(defaults.encode(&defaults), "");
}

#[test]
fn given_changed_fields_when_encoding_then_only_those_are_written_in_key_order() {
    let defaults = defaults();
    let mut params = defaults.clone();
    params.selected_status = Some(JobStatus::Failed);
    params.q = "etl job".to_string();
    params.page = 2;

    assert_eq!(
        params.encode(&defaults),
        "page=2&q=etl+job&selectedStatus=FAILED"
    );
}

#[test]
fn given_encoded_params_when_decoding_then_restores_them() {
    let defaults = defaults();
    let mut params = defaults.clone();
    params.selected_queue = Some("gpu".to_string());
    params.selected_ids = vec![JobId::new("a"), JobId::new("b")];
    params.sort_column = SortColumn::Name;
    params.sort_direction = SortDirection::Asc;
    params.start_date = now() - Duration::days(1);
    params.graph_type = GraphType::Bar;
    params.stats_metric = StatsMetric::JobCount;

    let decoded = QueryParams::decode(&params.encode(&defaults), &defaults);

    assert_eq!(decoded, params);
}

#[test]
fn given_invalid_values_when_decoding_then_falls_back_to_defaults() {
    let defaults = defaults();
    let decoded = QueryParams::decode(
        "?page=minus-one&sortColumn=color&selectedStatus=BOGUS&startDate=yesterday&unknown=1",
        &defaults,
    );

    assert_eq!(decoded, defaults);
}

#[test]
fn given_all_or_empty_selection_when_decoding_then_means_no_filter() {
    let defaults = defaults();
    let decoded = QueryParams::decode("selectedQueue=all&selectedStatus=", &defaults);

    assert_eq!(decoded.selected_queue, None);
    assert_eq!(decoded.selected_status, None);
}

#[test]
fn given_unix_seconds_when_decoding_dates_then_parses_them() {
    let defaults = defaults();
    let decoded = QueryParams::decode("startDate=1709251200&endDate=1709337600", &defaults);

    assert_eq!(decoded.start_date, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    assert_eq!(decoded.end_date, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());
}
