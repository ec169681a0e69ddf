//! TradeJournal Analytics — the dashboard metrics engine.
//!
//! This crate builds on `tradejournal-core` to provide:
//! - Pure scalar metrics (net pnl, win rate, profit factor, drawdown, Sharpe, streaks)
//! - Day-level aggregation and the daily / cumulative pnl series
//! - Session, weekday, side and symbol breakdowns
//! - The `DashboardMetrics` bundle consumed by the UI
//! - TOML analytics configuration
//! - Trade file loading and artifact export
//! - A parallel per-user overview for admins

pub mod breakdown;
pub mod config;
pub mod context;
pub mod daily;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod overview;
pub mod report;

pub use breakdown::{HoldingTime, SessionPnl, SideBreakdown, SymbolBreakdown};
pub use config::{AnalyticsConfig, ConfigError, HoldingTimeUnit, MetricsSettings};
pub use context::MetricsContext;
pub use daily::{CumulativePoint, DailyPnl, DayStats};
pub use export::save_artifacts;
pub use loader::{load_journals, load_records, load_trades, LoadError};
pub use metrics::{ProfitFactor, Streaks};
pub use overview::{admin_overview, user_overview, UserSummary};
pub use report::DashboardMetrics;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn dashboard_metrics_is_send_sync() {
        assert_send::<DashboardMetrics>();
        assert_sync::<DashboardMetrics>();
    }

    #[test]
    fn context_is_send_sync() {
        assert_send::<MetricsContext>();
        assert_sync::<MetricsContext>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<AnalyticsConfig>();
        assert_sync::<AnalyticsConfig>();
        assert_send::<HoldingTimeUnit>();
        assert_sync::<HoldingTimeUnit>();
    }

    #[test]
    fn user_summary_is_send_sync() {
        assert_send::<UserSummary>();
        assert_sync::<UserSummary>();
    }
}
