//! Admin overview — one summary row per user, computed in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tradejournal_core::{AccessError, AccessPolicy, Principal, Trade, UserId};

use crate::context::MetricsContext;
use crate::metrics::ProfitFactor;
use crate::report::DashboardMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user: UserId,
    pub trade_count: usize,
    pub net_pnl: f64,
    pub win_rate: f64,
    pub profit_factor: ProfitFactor,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

impl UserSummary {
    pub fn from_metrics(user: UserId, m: &DashboardMetrics) -> Self {
        Self {
            user,
            trade_count: m.trade_count,
            net_pnl: m.net_pnl,
            win_rate: m.win_rate,
            profit_factor: m.profit_factor,
            max_drawdown: m.max_drawdown,
            sharpe_ratio: m.sharpe_ratio,
        }
    }
}

/// Summaries for every journal, best net pnl first (ties by user id).
pub fn user_overview(
    journals: &BTreeMap<UserId, Vec<Trade>>,
    ctx: &MetricsContext,
) -> Vec<UserSummary> {
    let mut rows: Vec<UserSummary> = journals
        .par_iter()
        .map(|(user, trades)| {
            UserSummary::from_metrics(user.clone(), &DashboardMetrics::compute(trades, ctx))
        })
        .collect();
    rows.sort_by(|a, b| {
        b.net_pnl
            .partial_cmp(&a.net_pnl)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.user.cmp(&b.user))
    });
    rows
}

/// [`user_overview`] gated on admin privileges.
pub fn admin_overview(
    principal: &Principal,
    policy: &AccessPolicy,
    journals: &BTreeMap<UserId, Vec<Trade>>,
    ctx: &MetricsContext,
) -> Result<Vec<UserSummary>, AccessError> {
    policy.require_admin(principal)?;
    Ok(user_overview(journals, ctx))
}
