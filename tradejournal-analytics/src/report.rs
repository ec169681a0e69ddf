//! DashboardMetrics — the full analytics bundle for one trade collection.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tradejournal_core::fingerprint::dataset_hash;
use tradejournal_core::{DatasetHash, Trade};

use crate::breakdown::{
    average_holding_time, best_session, best_weekday, session_pnl, side_breakdown,
    symbol_breakdown, weekday_name, HoldingTime, SessionPnl, SideBreakdown, SymbolBreakdown,
};
use crate::context::MetricsContext;
use crate::daily::{cumulative_pnl, daily_pnl, day_stats, CumulativePoint, DailyPnl, DayStats};
use crate::metrics::{self, ProfitFactor, Streaks};

/// Every scalar, series and breakdown shown on the dashboard.
///
/// Recomputed from scratch on every call; holds no state between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    // ── Identity ──
    pub dataset_hash: DatasetHash,
    pub trade_count: usize,

    // ── Totals and ratios ──
    pub net_pnl: f64,
    pub win_rate: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: ProfitFactor,
    pub average_win: f64,
    pub average_loss: f64,
    pub average_reward_to_risk: f64,

    // ── Risk ──
    pub max_drawdown: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,

    // ── Streaks ──
    pub streaks: Streaks,

    // ── Days ──
    pub days: DayStats,

    // ── Timing ──
    pub average_holding_time: HoldingTime,
    pub best_time_to_enter: Option<String>,
    pub best_day_of_week: Option<String>,

    // ── Series ──
    pub daily_pnl: Vec<DailyPnl>,
    pub cumulative_pnl: Vec<CumulativePoint>,
    pub session_pnl: Vec<SessionPnl>,

    // ── Breakdowns ──
    pub sides: Vec<SideBreakdown>,
    pub symbols: Vec<SymbolBreakdown>,
}

impl DashboardMetrics {
    /// Compute everything from a (possibly pre-filtered) trade list.
    pub fn compute(trades: &[Trade], ctx: &MetricsContext) -> Self {
        let settings = ctx.settings();
        let daily = daily_pnl(trades, &ctx.clock);
        let cumulative = cumulative_pnl(&daily);

        debug!(
            trades = trades.len(),
            days = daily.len(),
            "computing dashboard metrics"
        );

        Self {
            dataset_hash: dataset_hash(trades),
            trade_count: trades.len(),
            net_pnl: metrics::net_pnl(trades),
            win_rate: metrics::win_rate(trades),
            gross_profit: metrics::gross_profit(trades),
            gross_loss: metrics::gross_loss(trades),
            profit_factor: metrics::profit_factor(trades),
            average_win: metrics::average_win(trades),
            average_loss: metrics::average_loss(trades),
            average_reward_to_risk: metrics::average_reward_to_risk(trades),
            max_drawdown: metrics::max_drawdown(trades, &ctx.clock),
            volatility: metrics::volatility(trades),
            sharpe_ratio: metrics::sharpe_ratio(trades, settings.annualization_days),
            streaks: metrics::streaks(trades),
            days: day_stats(&daily),
            average_holding_time: average_holding_time(trades, settings.holding_time_unit),
            best_time_to_enter: best_session(trades).map(|s| s.label().to_string()),
            best_day_of_week: best_weekday(trades, &ctx.clock)
                .map(|d| weekday_name(d).to_string()),
            daily_pnl: daily,
            cumulative_pnl: cumulative,
            session_pnl: session_pnl(trades, &settings.missing_session_label),
            sides: side_breakdown(trades),
            symbols: symbol_breakdown(trades),
        }
    }
}
