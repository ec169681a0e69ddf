//! Lenient timestamp parsing against an explicit reference clock.
//!
//! Trade rows arrive with loosely formatted date strings. Parsing never fails
//! the computation: anything unparseable resolves to the clock's `now`.
//! The clock is passed in rather than read from the system so that two
//! computations over the same input produce identical output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%d %b %Y"];

/// Parse a timestamp in any of the accepted formats.
///
/// RFC 3339 values with an offset are converted to UTC. Bare dates resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// The "now" used wherever a timestamp is missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceClock {
    now: NaiveDateTime,
}

impl ReferenceClock {
    /// Clock pinned to the current UTC time.
    pub fn system() -> Self {
        Self {
            now: Utc::now().naive_utc(),
        }
    }

    pub fn fixed(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Parse `raw`, falling back to `now` when it cannot be parsed.
    pub fn parse_or_now(&self, raw: &str) -> NaiveDateTime {
        match parse_timestamp(raw) {
            Some(ts) => ts,
            None => {
                warn!(raw, fallback = %self.now, "unparseable timestamp, using reference clock");
                self.now
            }
        }
    }
}
