//! TradeRecord — the loosely-typed row shape returned by the hosted trade store.
//!
//! Every field is optional on the wire. `into_trade` applies the defaulting
//! rules once, at the boundary, so the analytics layer only ever sees typed
//! `Trade` values with a defined `pnl` and display `date`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{display_date, NewsEvent, Session, Trade, TradeId, TradeType, UserId};
use crate::timestamp::ReferenceClock;

/// A trade row as stored (camelCase keys, every field optional).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeRecord {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub symbol: Option<String>,
    pub pnl: Option<f64>,
    pub entry_date: Option<String>,
    pub exit_date: Option<String>,
    pub created_at: Option<String>,
    pub trade_type: Option<String>,
    pub session: Option<String>,
    pub reward_to_risk_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub news: Vec<NewsEvent>,
    pub entry_model: Option<String>,
    pub mistakes_made: Option<String>,
    pub lessons_learned: Option<String>,
    pub trade_rating: Option<u8>,
    pub notes: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TradeRecord {
    /// Owner of the row, if the store included it.
    pub fn owner(&self) -> Option<UserId> {
        non_empty(&self.user_id).map(UserId::new)
    }

    /// Convert into a typed trade.
    ///
    /// - Missing or non-finite `pnl` becomes 0.
    /// - Malformed entry/exit timestamps resolve to the clock's `now`.
    /// - An explicit `date` is kept verbatim; otherwise it is derived from
    ///   exit, entry, then creation time.
    /// - Non-positive reward-to-risk ratios are dropped.
    /// - A missing `id` is derived from the row content, so reloading the
    ///   same file yields the same ids.
    pub fn into_trade(self, clock: &ReferenceClock) -> Trade {
        self.into_trade_at(0, clock)
    }

    /// [`TradeRecord::into_trade`] for the `row`-th record of a file. The row
    /// position keeps identical id-less rows distinct.
    pub fn into_trade_at(self, row: usize, clock: &ReferenceClock) -> Trade {
        let id = match non_empty(&self.id) {
            Some(id) => TradeId::new(id),
            None => TradeId::derived(&serde_json::to_vec(&self).unwrap_or_default(), row),
        };

        let pnl = match self.pnl {
            Some(p) if p.is_finite() => p,
            Some(p) => {
                warn!(id = ?self.id, pnl = p, "non-finite pnl coerced to 0");
                0.0
            }
            None => 0.0,
        };

        let entry_date = non_empty(&self.entry_date).map(|s| clock.parse_or_now(s));
        let exit_date = non_empty(&self.exit_date).map(|s| clock.parse_or_now(s));

        let date = match non_empty(&self.date) {
            Some(d) => d.to_string(),
            None => {
                let created: NaiveDateTime = non_empty(&self.created_at)
                    .map(|s| clock.parse_or_now(s))
                    .unwrap_or_else(|| clock.now());
                display_date(exit_date, entry_date, created)
            }
        };

        let trade_type = non_empty(&self.trade_type).and_then(|raw| {
            let parsed = TradeType::parse(raw);
            if parsed.is_none() {
                debug!(raw, "unrecognized trade type ignored");
            }
            parsed
        });
        let session = non_empty(&self.session).and_then(|raw| {
            let parsed = Session::parse(raw);
            if parsed.is_none() {
                debug!(raw, "unrecognized session ignored");
            }
            parsed
        });

        Trade {
            id,
            date,
            symbol: self.symbol.unwrap_or_default().trim().to_string(),
            pnl,
            reward_to_risk_ratio: self.reward_to_risk_ratio.filter(|r| r.is_finite() && *r > 0.0),
            entry_date,
            exit_date,
            session,
            trade_type,
            news: self.news,
            entry_model: self.entry_model,
            mistakes_made: self.mistakes_made,
            lessons_learned: self.lessons_learned,
            trade_rating: self.trade_rating,
            notes: self.notes,
        }
    }
}
