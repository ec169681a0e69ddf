//! Artifact export: report JSON, daily series CSV, trade tape CSV.
//!
//! Artifacts for a trade collection land in `<output_dir>/<hash12>/`, so
//! re-exporting the same collection overwrites rather than duplicates.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tradejournal_core::Trade;

use crate::report::DashboardMetrics;

#[derive(Serialize)]
struct DailyRow<'a> {
    date: &'a str,
    pnl: f64,
    trade_count: usize,
    cumulative: f64,
}

#[derive(Serialize)]
struct TradeRow<'a> {
    id: &'a str,
    date: &'a str,
    symbol: &'a str,
    pnl: f64,
    trade_type: Option<&'static str>,
    session: Option<&'static str>,
    entry_date: Option<String>,
    exit_date: Option<String>,
    reward_to_risk_ratio: Option<f64>,
    news_count: usize,
}

impl<'a> From<&'a Trade> for TradeRow<'a> {
    fn from(t: &'a Trade) -> Self {
        Self {
            id: t.id.as_str(),
            date: &t.date,
            symbol: &t.symbol,
            pnl: t.pnl,
            trade_type: t.trade_type.map(|s| s.label()),
            session: t.session.map(|s| s.label()),
            entry_date: t.entry_date.map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string()),
            exit_date: t.exit_date.map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string()),
            reward_to_risk_ratio: t.reward_to_risk_ratio,
            news_count: t.news.len(),
        }
    }
}

pub fn write_report_json(path: &Path, report: &DashboardMetrics) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(())
}

/// Daily pnl with the running total alongside (no synthetic start row).
pub fn write_daily_csv(path: &Path, report: &DashboardMetrics) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create daily CSV {}", path.display()))?;
    let mut running = 0.0;
    for day in &report.daily_pnl {
        running += day.pnl;
        writer.serialize(DailyRow {
            date: &day.date,
            pnl: day.pnl,
            trade_count: day.trade_count,
            cumulative: running,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;
    for trade in trades {
        writer.serialize(TradeRow::from(trade))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `report.json`, `daily.csv` and `trades.csv`. Returns the artifact directory.
pub fn save_artifacts(
    report: &DashboardMetrics,
    trades: &[Trade],
    output_dir: &Path,
) -> Result<PathBuf> {
    let dir = output_dir.join(report.dataset_hash.short());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create artifact dir {}", dir.display()))?;

    write_report_json(&dir.join("report.json"), report)?;
    write_daily_csv(&dir.join("daily.csv"), report)?;
    write_trades_csv(&dir.join("trades.csv"), trades)?;

    tracing::info!(dir = %dir.display(), "artifacts saved");
    Ok(dir)
}
