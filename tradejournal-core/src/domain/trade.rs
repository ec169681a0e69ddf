//! Trade — a single journaled round trip.

use super::ids::TradeId;
use super::news::NewsEvent;
use super::session::{Session, TradeType};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format used for the display `date` of a trade.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// A journaled trade.
///
/// `pnl` is always defined. `date` is the display date used for day grouping;
/// it is compared as an exact string, not normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    // ── Identification ──
    pub id: TradeId,
    pub date: String,
    pub symbol: String,

    // ── Outcome ──
    pub pnl: f64,
    pub reward_to_risk_ratio: Option<f64>,

    // ── Timing ──
    pub entry_date: Option<NaiveDateTime>,
    pub exit_date: Option<NaiveDateTime>,
    pub session: Option<Session>,

    // ── Classification ──
    pub trade_type: Option<TradeType>,
    #[serde(default)]
    pub news: Vec<NewsEvent>,

    // ── Journal notes ──
    pub entry_model: Option<String>,
    pub mistakes_made: Option<String>,
    pub lessons_learned: Option<String>,
    pub trade_rating: Option<u8>,
    pub notes: Option<String>,
}

impl Trade {
    /// Minimal trade with every optional field empty.
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        symbol: impl Into<String>,
        pnl: f64,
    ) -> Self {
        Self {
            id: TradeId::new(id),
            date: date.into(),
            symbol: symbol.into(),
            pnl,
            reward_to_risk_ratio: None,
            entry_date: None,
            exit_date: None,
            session: None,
            trade_type: None,
            news: Vec::new(),
            entry_model: None,
            mistakes_made: None,
            lessons_learned: None,
            trade_rating: None,
            notes: None,
        }
    }

    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.pnl < 0.0
    }

    /// Streak predicate: breakeven trades break a winning run.
    pub fn is_streak_loss(&self) -> bool {
        self.pnl <= 0.0
    }

    /// Time between entry and exit. `None` unless both are set and exit is not before entry.
    pub fn holding_duration(&self) -> Option<Duration> {
        match (self.entry_date, self.exit_date) {
            (Some(entry), Some(exit)) if exit >= entry => Some(exit - entry),
            _ => None,
        }
    }

    /// Positive reward-to-risk ratio, if recorded.
    pub fn positive_reward_to_risk(&self) -> Option<f64> {
        self.reward_to_risk_ratio
            .filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Display date: exit date, else entry date, else the creation time.
pub fn display_date(
    exit: Option<NaiveDateTime>,
    entry: Option<NaiveDateTime>,
    created: NaiveDateTime,
) -> String {
    exit.or(entry)
        .unwrap_or(created)
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn win_loss_predicates() {
        let win = Trade::new("a", "2024-01-02", "ES", 10.0);
        let flat = Trade::new("b", "2024-01-02", "ES", 0.0);
        let loss = Trade::new("c", "2024-01-02", "ES", -5.0);

        assert!(win.is_win() && !win.is_loss() && !win.is_streak_loss());
        assert!(!flat.is_win() && !flat.is_loss() && flat.is_streak_loss());
        assert!(!loss.is_win() && loss.is_loss() && loss.is_streak_loss());
    }

    #[test]
    fn holding_duration_requires_both_dates() {
        let mut t = Trade::new("a", "2024-01-02", "NQ", 1.0);
        assert!(t.holding_duration().is_none());

        t.entry_date = Some(at(2024, 1, 2, 9, 30));
        assert!(t.holding_duration().is_none());

        t.exit_date = Some(at(2024, 1, 2, 11, 0));
        assert_eq!(t.holding_duration(), Some(Duration::minutes(90)));
    }

    #[test]
    fn holding_duration_rejects_exit_before_entry() {
        let mut t = Trade::new("a", "2024-01-02", "NQ", 1.0);
        t.entry_date = Some(at(2024, 1, 2, 11, 0));
        t.exit_date = Some(at(2024, 1, 2, 9, 0));
        assert!(t.holding_duration().is_none());
    }

    #[test]
    fn reward_to_risk_must_be_positive() {
        let mut t = Trade::new("a", "2024-01-02", "NQ", 1.0);
        t.reward_to_risk_ratio = Some(0.0);
        assert_eq!(t.positive_reward_to_risk(), None);
        t.reward_to_risk_ratio = Some(2.5);
        assert_eq!(t.positive_reward_to_risk(), Some(2.5));
    }

    #[test]
    fn display_date_precedence() {
        let created = at(2024, 3, 1, 0, 0);
        let entry = at(2024, 2, 10, 9, 30);
        let exit = at(2024, 2, 11, 16, 0);

        assert_eq!(display_date(Some(exit), Some(entry), created), "2024-02-11");
        assert_eq!(display_date(None, Some(entry), created), "2024-02-10");
        assert_eq!(display_date(None, None, created), "2024-03-01");
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let mut trade = Trade::new("t1", "2024-01-05", "EURUSD", 42.5);
        trade.session = Some(Session::London);
        trade.trade_type = Some(TradeType::Short);
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, back);
    }
}
