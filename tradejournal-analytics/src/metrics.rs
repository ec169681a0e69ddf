//! Scalar performance metrics — pure functions over a trade list.
//!
//! Every metric is a pure function: trades in, scalar out. None of them
//! mutate or reorder the caller's slice, and none of them fail: empty input
//! and zero denominators resolve to documented sentinels instead of NaN.

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tradejournal_core::{ReferenceClock, Trade};

/// Serialized form of an unbounded profit factor.
pub const UNBOUNDED_LABEL: &str = "unbounded";

/// Gross profit over gross loss.
///
/// `Unbounded` when there are profits but no losses; displayed as `∞`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfitFactor {
    Finite(f64),
    Unbounded,
}

impl ProfitFactor {
    pub fn value(&self) -> Option<f64> {
        match self {
            ProfitFactor::Finite(v) => Some(*v),
            ProfitFactor::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, ProfitFactor::Unbounded)
    }
}

impl Default for ProfitFactor {
    fn default() -> Self {
        ProfitFactor::Finite(0.0)
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(v) => write!(f, "{v:.2}"),
            ProfitFactor::Unbounded => f.write_str("∞"),
        }
    }
}

impl Serialize for ProfitFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProfitFactor::Finite(v) => serializer.serialize_f64(*v),
            ProfitFactor::Unbounded => serializer.serialize_str(UNBOUNDED_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for ProfitFactor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Label(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(ProfitFactor::Finite(v)),
            Repr::Label(s) if s == UNBOUNDED_LABEL || s == "∞" => Ok(ProfitFactor::Unbounded),
            Repr::Label(other) => Err(D::Error::custom(format!(
                "expected a number or \"{UNBOUNDED_LABEL}\", got \"{other}\""
            ))),
        }
    }
}

/// Win and loss run lengths. Breakeven trades count as losses here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub current_win: usize,
    pub max_win: usize,
    pub current_loss: usize,
    pub max_loss: usize,
}

// ─── Totals and ratios ──────────────────────────────────────────────

/// Sum of pnl.
pub fn net_pnl(trades: &[Trade]) -> f64 {
    trades.iter().map(|t| t.pnl).sum()
}

/// Percentage (0–100) of trades with positive pnl.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_win()).count();
    winners as f64 / trades.len() as f64 * 100.0
}

/// Sum of positive pnl.
pub fn gross_profit(trades: &[Trade]) -> f64 {
    trades.iter().filter(|t| t.is_win()).map(|t| t.pnl).sum()
}

/// Absolute sum of negative pnl.
pub fn gross_loss(trades: &[Trade]) -> f64 {
    trades
        .iter()
        .filter(|t| t.is_loss())
        .map(|t| t.pnl.abs())
        .sum()
}

/// Profit factor: gross profit / gross loss.
///
/// No losses and some profit → `Unbounded`; no losses and no profit → 0.
pub fn profit_factor(trades: &[Trade]) -> ProfitFactor {
    let profit = gross_profit(trades);
    let loss = gross_loss(trades);
    if loss <= 0.0 {
        return if profit > 0.0 {
            ProfitFactor::Unbounded
        } else {
            ProfitFactor::Finite(0.0)
        };
    }
    ProfitFactor::Finite(profit / loss)
}

/// Mean pnl of winning trades, 0 if none.
pub fn average_win(trades: &[Trade]) -> f64 {
    mean_f64(&trades.iter().filter(|t| t.is_win()).map(|t| t.pnl).collect::<Vec<_>>())
}

/// Mean pnl of strictly losing trades (a negative number), 0 if none.
pub fn average_loss(trades: &[Trade]) -> f64 {
    mean_f64(&trades.iter().filter(|t| t.is_loss()).map(|t| t.pnl).collect::<Vec<_>>())
}

/// Mean reward-to-risk over trades that recorded a positive ratio.
pub fn average_reward_to_risk(trades: &[Trade]) -> f64 {
    let ratios: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.positive_reward_to_risk())
        .collect();
    mean_f64(&ratios)
}

// ─── Risk ───────────────────────────────────────────────────────────

/// Maximum drawdown of cumulative pnl, as a positive percentage of the running peak.
///
/// Trades are ordered by display date on a private copy (stable, so same-day
/// trades keep their given order). Points where the peak is not yet positive
/// contribute nothing.
pub fn max_drawdown(trades: &[Trade], clock: &ReferenceClock) -> f64 {
    let mut ordered: Vec<(NaiveDateTime, f64)> = trades
        .iter()
        .map(|t| (clock.parse_or_now(&t.date), t.pnl))
        .collect();
    ordered.sort_by_key(|(ts, _)| *ts);

    let mut cumulative = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;

    for (_, pnl) in ordered {
        cumulative += pnl;
        if cumulative > peak {
            peak = cumulative;
        }
        if peak > 0.0 {
            let dd = (peak - cumulative) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Population standard deviation of pnl as a percentage of mean pnl.
///
/// 0 for fewer than two trades or a zero mean. Negative when the mean is negative.
pub fn volatility(trades: &[Trade]) -> f64 {
    if trades.len() < 2 {
        return 0.0;
    }
    let pnls = pnls(trades);
    let mean = mean_f64(&pnls);
    if mean == 0.0 {
        return 0.0;
    }
    population_std_dev(&pnls) / mean * 100.0
}

/// Annualized Sharpe ratio of per-trade pnl.
///
/// Sharpe = mean(pnl) / std(pnl) * sqrt(annualization_days).
/// Returns 0.0 for empty input or zero deviation.
pub fn sharpe_ratio(trades: &[Trade], annualization_days: u32) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let pnls = pnls(trades);
    let std = population_std_dev(&pnls);
    if std < 1e-15 {
        return 0.0;
    }
    (mean_f64(&pnls) / std) * f64::from(annualization_days).sqrt()
}

// ─── Streaks ────────────────────────────────────────────────────────

/// Current and maximum win/loss runs, scanning in the given order.
pub fn streaks(trades: &[Trade]) -> Streaks {
    let mut s = Streaks::default();
    for trade in trades {
        if trade.is_streak_loss() {
            s.current_loss += 1;
            s.current_win = 0;
            s.max_loss = s.max_loss.max(s.current_loss);
        } else {
            s.current_win += 1;
            s.current_loss = 0;
            s.max_win = s.max_win.max(s.current_win);
        }
    }
    s
}

// ─── Helpers ────────────────────────────────────────────────────────

fn pnls(trades: &[Trade]) -> Vec<f64> {
    trades.iter().map(|t| t.pnl).collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
