//! Day-level aggregation: per-day pnl, win days, and the cumulative series.
//!
//! Days are keyed by the trade's display `date` string exactly as stored;
//! no calendar normalization is applied. Ordering uses the parsed date.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tradejournal_core::{ReferenceClock, Trade};

use crate::metrics::mean_f64;

/// Label of the synthetic leading point of the cumulative series.
pub const CUMULATIVE_START_LABEL: &str = "start";

/// Summed pnl of all trades sharing a display date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnl {
    pub date: String,
    pub pnl: f64,
    pub trade_count: usize,
}

impl DailyPnl {
    pub fn is_winning(&self) -> bool {
        self.pnl > 0.0
    }
}

/// Running total of daily pnl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: String,
    pub cumulative: f64,
}

/// Win-day statistics over daily buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub winning_days: usize,
    pub total_days: usize,
    /// Percentage (0–100) of days with positive summed pnl.
    pub win_day_percentage: f64,
    pub average_daily_pnl: f64,
    /// Percentage (0–100) of days closed in profit.
    pub profit_consistency: f64,
}

/// Group trades by display date, ordered ascending by parsed date.
///
/// Same-date buckets keep first-encounter order; distinct strings that parse
/// to the same instant are ordered by the string itself.
pub fn daily_pnl(trades: &[Trade], clock: &ReferenceClock) -> Vec<DailyPnl> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut days: Vec<DailyPnl> = Vec::new();

    for trade in trades {
        match index.get(trade.date.as_str()) {
            Some(&i) => {
                days[i].pnl += trade.pnl;
                days[i].trade_count += 1;
            }
            None => {
                index.insert(trade.date.as_str(), days.len());
                days.push(DailyPnl {
                    date: trade.date.clone(),
                    pnl: trade.pnl,
                    trade_count: 1,
                });
            }
        }
    }

    let mut keyed: Vec<(NaiveDateTime, DailyPnl)> = days
        .into_iter()
        .map(|d| (clock.parse_or_now(&d.date), d))
        .collect();
    keyed.sort_by(|(ta, a), (tb, b)| ta.cmp(tb).then_with(|| a.date.cmp(&b.date)));
    keyed.into_iter().map(|(_, d)| d).collect()
}

/// Prefix sums of daily pnl with a leading zero point. Empty in, empty out.
pub fn cumulative_pnl(days: &[DailyPnl]) -> Vec<CumulativePoint> {
    if days.is_empty() {
        return Vec::new();
    }
    let mut series = Vec::with_capacity(days.len() + 1);
    series.push(CumulativePoint {
        date: CUMULATIVE_START_LABEL.to_string(),
        cumulative: 0.0,
    });
    let mut running = 0.0;
    for day in days {
        running += day.pnl;
        series.push(CumulativePoint {
            date: day.date.clone(),
            cumulative: running,
        });
    }
    series
}

pub fn day_stats(days: &[DailyPnl]) -> DayStats {
    if days.is_empty() {
        return DayStats::default();
    }
    let winning_days = days.iter().filter(|d| d.is_winning()).count();
    let total_days = days.len();
    let pct = winning_days as f64 / total_days as f64 * 100.0;
    let pnls: Vec<f64> = days.iter().map(|d| d.pnl).collect();
    DayStats {
        winning_days,
        total_days,
        win_day_percentage: pct,
        average_daily_pnl: mean_f64(&pnls),
        profit_consistency: pct,
    }
}
