//! Trade filters applied before metrics are computed.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{NewsImpact, Trade};
use crate::timestamp::ReferenceClock;

/// Inclusive date range over a trade's display date. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// The last `days` calendar days, ending today.
    pub fn last_days(days: u32, clock: &ReferenceClock) -> Self {
        let today = clock.today();
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: Some(today - Duration::days(span)),
            end: Some(today),
        }
    }

    /// From the first of the current month through today.
    pub fn month_to_date(clock: &ReferenceClock) -> Self {
        let today = clock.today();
        Self {
            start: today.with_day(1),
            end: Some(today),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// Trades whose display date falls inside the range.
    ///
    /// Unparseable dates resolve through the clock, like everywhere else.
    pub fn apply(&self, trades: &[Trade], clock: &ReferenceClock) -> Vec<Trade> {
        if self.is_unbounded() {
            return trades.to_vec();
        }
        trades
            .iter()
            .filter(|t| self.contains(clock.parse_or_now(&t.date).date()))
            .cloned()
            .collect()
    }
}

/// Keeps trades that coincided with news of the selected impact levels.
///
/// A trade with no recorded events matches `NoNews`. An empty selection keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFilter {
    pub impacts: BTreeSet<NewsImpact>,
}

impl NewsFilter {
    pub fn new(impacts: impl IntoIterator<Item = NewsImpact>) -> Self {
        Self {
            impacts: impacts.into_iter().collect(),
        }
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        if self.impacts.is_empty() {
            return true;
        }
        if trade.news.is_empty() {
            return self.impacts.contains(&NewsImpact::NoNews);
        }
        trade.news.iter().any(|ev| self.impacts.contains(&ev.impact))
    }

    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
