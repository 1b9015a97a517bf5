use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Parses an upstream timestamp. Anything that is not RFC 3339 yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Duration from `from` to `to`. Negative when the upstream clocks disagree;
/// callers get the raw difference.
pub fn elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> TimeDelta {
    to.signed_duration_since(from)
}

/// Fractional seconds of a duration, microsecond precision. Spans too long
/// to count in microseconds fall back to milliseconds.
pub fn as_seconds_f64(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1000.0,
    }
}

/// Caller-supplied reporting window used for fleet-relative stats rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Wall-clock seconds covered by the window (`end - start`).
    pub fn elapsed_seconds(&self) -> f64 {
        as_seconds_f64(elapsed(self.start, self.end))
    }
}
