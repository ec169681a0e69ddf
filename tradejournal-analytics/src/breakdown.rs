//! Categorical breakdowns: session, weekday, side, symbol, holding time.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tradejournal_core::{ReferenceClock, Session, Trade, TradeType};

use crate::config::HoldingTimeUnit;
use crate::metrics::{mean_f64, net_pnl, win_rate};

/// Summed pnl for one session bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPnl {
    pub label: String,
    pub pnl: f64,
    pub trade_count: usize,
}

/// Direction-level summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideBreakdown {
    pub side: TradeType,
    pub trade_count: usize,
    pub net_pnl: f64,
    pub win_rate: f64,
}

/// Instrument-level summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolBreakdown {
    pub symbol: String,
    pub trade_count: usize,
    pub net_pnl: f64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingTime {
    pub unit: HoldingTimeUnit,
    pub average: f64,
}

/// Session → pnl buckets in session order, then the missing-session bucket.
///
/// Buckets without trades are omitted.
pub fn session_pnl(trades: &[Trade], missing_label: &str) -> Vec<SessionPnl> {
    let mut buckets: Vec<SessionPnl> = Session::ALL
        .iter()
        .map(|s| SessionPnl {
            label: s.label().to_string(),
            pnl: 0.0,
            trade_count: 0,
        })
        .collect();
    buckets.push(SessionPnl {
        label: missing_label.to_string(),
        pnl: 0.0,
        trade_count: 0,
    });
    let missing_idx = buckets.len() - 1;

    for trade in trades {
        let idx = trade
            .session
            .and_then(|s| Session::ALL.iter().position(|x| *x == s))
            .unwrap_or(missing_idx);
        buckets[idx].pnl += trade.pnl;
        buckets[idx].trade_count += 1;
    }

    buckets.retain(|b| b.trade_count > 0);
    buckets
}

/// Session with the most trades. Ties go to the session encountered first.
///
/// Trades without a session are ignored; `None` if no trade has one.
pub fn best_session(trades: &[Trade]) -> Option<Session> {
    let mut counts: Vec<(Session, usize)> = Vec::new();
    for session in trades.iter().filter_map(|t| t.session) {
        match counts.iter_mut().find(|(s, _)| *s == session) {
            Some((_, n)) => *n += 1,
            None => counts.push((session, 1)),
        }
    }
    first_max(counts.into_iter(), |n| n as f64)
}

/// Weekday with the highest summed pnl. Ties go to the weekday encountered first.
pub fn best_weekday(trades: &[Trade], clock: &ReferenceClock) -> Option<Weekday> {
    let mut sums: Vec<(Weekday, f64)> = Vec::new();
    for trade in trades {
        let weekday = clock.parse_or_now(&trade.date).weekday();
        match sums.iter_mut().find(|(w, _)| *w == weekday) {
            Some((_, total)) => *total += trade.pnl,
            None => sums.push((weekday, trade.pnl)),
        }
    }
    first_max(sums.into_iter(), |v| v)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Mean holding time over trades with both entry and exit; 0 if none.
pub fn average_holding_time(trades: &[Trade], unit: HoldingTimeUnit) -> HoldingTime {
    let durations: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.holding_duration())
        .map(|d| d.num_seconds() as f64 / unit.seconds_per_unit())
        .collect();
    HoldingTime {
        unit,
        average: mean_f64(&durations),
    }
}

/// Long then short; sides without trades are omitted.
pub fn side_breakdown(trades: &[Trade]) -> Vec<SideBreakdown> {
    [TradeType::Long, TradeType::Short]
        .into_iter()
        .filter_map(|side| {
            let subset: Vec<Trade> = trades
                .iter()
                .filter(|t| t.trade_type == Some(side))
                .cloned()
                .collect();
            if subset.is_empty() {
                return None;
            }
            Some(SideBreakdown {
                side,
                trade_count: subset.len(),
                net_pnl: net_pnl(&subset),
                win_rate: win_rate(&subset),
            })
        })
        .collect()
}

/// Per-symbol totals, best net pnl first (ties by symbol).
pub fn symbol_breakdown(trades: &[Trade]) -> Vec<SymbolBreakdown> {
    let mut groups: HashMap<&str, Vec<Trade>> = HashMap::new();
    for trade in trades {
        groups
            .entry(trade.symbol.as_str())
            .or_default()
            .push(trade.clone());
    }

    let mut rows: Vec<SymbolBreakdown> = groups
        .into_iter()
        .map(|(symbol, subset)| SymbolBreakdown {
            symbol: symbol.to_string(),
            trade_count: subset.len(),
            net_pnl: net_pnl(&subset),
            win_rate: win_rate(&subset),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.net_pnl
            .partial_cmp(&a.net_pnl)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    rows
}

/// First key whose score is strictly greater than every earlier one.
fn first_max<K, V>(items: impl Iterator<Item = (K, V)>, score: impl Fn(V) -> f64) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for (key, value) in items {
        let s = score(value);
        if best.as_ref().map_or(true, |(_, top)| s > *top) {
            best = Some((key, s));
        }
    }
    best.map(|(k, _)| k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn clock() -> ReferenceClock {
        ReferenceClock::fixed(
            NaiveDate::from_ymd_opt(2024, 12, 31)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    fn t(date: &str, pnl: f64, session: Option<Session>) -> Trade {
        let mut trade = Trade::new(date, date, "ES", pnl);
        trade.session = session;
        trade
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn session_buckets_in_order_with_missing_label() {
        let trades = vec![
            t("2024-01-01", 10.0, Some(Session::NyPm)),
            t("2024-01-01", 5.0, None),
            t("2024-01-02", -3.0, Some(Session::London)),
            t("2024-01-02", 7.0, Some(Session::NyPm)),
        ];
        let buckets = session_pnl(&trades, "Unknown");
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["London", "NY PM", "Unknown"]);
        assert_eq!(buckets[1].pnl, 17.0);
        assert_eq!(buckets[1].trade_count, 2);
        assert_eq!(buckets[2].pnl, 5.0);
    }

    #[test]
    fn session_sum_equals_net() {
        let trades = vec![
            t("2024-01-01", 10.0, Some(Session::Asia)),
            t("2024-01-01", -2.5, None),
            t("2024-01-02", 4.0, Some(Session::NyAm)),
        ];
        let total: f64 = session_pnl(&trades, "Unknown").iter().map(|b| b.pnl).sum();
        assert!((total - net_pnl(&trades)).abs() < 1e-10);
    }

    #[test]
    fn best_session_by_count_first_on_tie() {
        let trades = vec![
            t("2024-01-01", -100.0, Some(Session::London)),
            t("2024-01-01", 1.0, Some(Session::NyAm)),
            t("2024-01-02", -1.0, Some(Session::London)),
            t("2024-01-02", 1.0, Some(Session::NyAm)),
            t("2024-01-02", 1.0, None),
        ];
        assert_eq!(best_session(&trades), Some(Session::London));
        assert_eq!(best_session(&[t("2024-01-01", 1.0, None)]), None);
    }

    #[test]
    fn best_weekday_by_summed_pnl() {
        // 2024-01-01 Monday, 2024-01-02 Tuesday, 2024-01-08 Monday
        let trades = vec![
            t("2024-01-01", 10.0, None),
            t("2024-01-02", 15.0, None),
            t("2024-01-08", 10.0, None),
        ];
        assert_eq!(best_weekday(&trades, &clock()), Some(Weekday::Mon));
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(best_weekday(&[], &clock()), None);
    }

    #[test]
    fn best_weekday_tie_goes_to_first_seen() {
        let trades = vec![t("2024-01-02", 5.0, None), t("2024-01-01", 5.0, None)];
        assert_eq!(best_weekday(&trades, &clock()), Some(Weekday::Tue));
    }

    #[test]
    fn holding_time_in_hours_and_minutes() {
        let mut a = t("2024-01-02", 1.0, None);
        a.entry_date = Some(at(9, 0));
        a.exit_date = Some(at(10, 0));
        let mut b = t("2024-01-02", 1.0, None);
        b.entry_date = Some(at(9, 0));
        b.exit_date = Some(at(12, 0));
        let no_exit = {
            let mut c = t("2024-01-02", 1.0, None);
            c.entry_date = Some(at(9, 0));
            c
        };
        let trades = vec![a, b, no_exit];

        let hours = average_holding_time(&trades, HoldingTimeUnit::Hours);
        assert!((hours.average - 2.0).abs() < 1e-10);
        let minutes = average_holding_time(&trades, HoldingTimeUnit::Minutes);
        assert!((minutes.average - 120.0).abs() < 1e-10);
        assert_eq!(average_holding_time(&[], HoldingTimeUnit::Hours).average, 0.0);
    }

    #[test]
    fn side_breakdown_skips_untyped() {
        let mut long = t("2024-01-01", 10.0, None);
        long.trade_type = Some(TradeType::Long);
        let mut short = t("2024-01-01", -4.0, None);
        short.trade_type = Some(TradeType::Short);
        let untyped = t("2024-01-01", 99.0, None);

        let rows = side_breakdown(&[long, short, untyped]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].side, TradeType::Long);
        assert_eq!(rows[0].net_pnl, 10.0);
        assert_eq!(rows[0].win_rate, 100.0);
        assert_eq!(rows[1].side, TradeType::Short);
        assert_eq!(rows[1].win_rate, 0.0);
    }

    #[test]
    fn symbol_breakdown_sorted_by_pnl() {
        let mut trades = vec![t("2024-01-01", 5.0, None), t("2024-01-01", -1.0, None)];
        let mut nq = t("2024-01-01", 20.0, None);
        nq.symbol = "NQ".into();
        trades.push(nq);

        let rows = symbol_breakdown(&trades);
        assert_eq!(rows[0].symbol, "NQ");
        assert_eq!(rows[1].symbol, "ES");
        assert_eq!(rows[1].trade_count, 2);
        assert_eq!(rows[1].net_pnl, 4.0);
        assert_eq!(rows[1].win_rate, 50.0);
    }
}
