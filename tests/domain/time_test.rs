use chrono::{TimeDelta, TimeZone, Utc};

use batchdash::domain::ReportingWindow;
use batchdash::domain::time::{as_seconds_f64, elapsed, parse_timestamp};

#[test]
fn given_sub_millisecond_timestamps_when_measuring_then_keeps_microseconds() {
    let from = parse_timestamp("2024-03-01T10:00:00.000100Z").unwrap();
    let to = parse_timestamp("2024-03-01T10:00:01.000350Z").unwrap();

    assert_eq!(as_seconds_f64(elapsed(from, to)), 1.00025);
}

#[test]
fn given_clock_skew_when_measuring_then_duration_is_negative() {
    let from = parse_timestamp("2024-03-01T10:00:05Z").unwrap();
    let to = parse_timestamp("2024-03-01T10:00:00.5Z").unwrap();

    assert_eq!(as_seconds_f64(elapsed(from, to)), -4.5);
}

#[test]
fn given_span_beyond_microsecond_range_when_converting_then_falls_back_to_milliseconds() {
    let huge = TimeDelta::milliseconds(i64::MAX / 2);

    assert_eq!(as_seconds_f64(huge), (i64::MAX / 2) as f64 / 1000.0);
}

#[test]
fn given_offset_timestamp_when_parsing_then_normalizes_to_utc() {
    let parsed = parse_timestamp("2024-03-01T12:00:00+02:00").unwrap();

    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    assert_eq!(parse_timestamp("03/01/2024"), None);
}

#[test]
fn given_reporting_window_when_measuring_then_returns_elapsed_seconds() {
    let window = ReportingWindow::new(
        Utc.timestamp_opt(0, 0).unwrap(),
        Utc.timestamp_opt(90, 250_000_000).unwrap(),
    );

    assert_eq!(window.elapsed_seconds(), 90.25);
}
