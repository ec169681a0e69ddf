//! Trade store contract and an in-memory implementation.
//!
//! Persistence belongs to the hosted backend; this trait is the call/response
//! surface the rest of the system depends on. `InMemoryTradeStore` is the
//! reference implementation the contract tests run against.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{display_date, NewsEvent, Session, Trade, TradeId, TradeType, UserId};
use crate::timestamp::ReferenceClock;

/// Errors from trade store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("trade '{id}' not found for user '{user}'")]
    NotFound { user: UserId, id: TradeId },

    #[error("invalid trade: {0}")]
    Invalid(String),

    #[error("trade store lock poisoned")]
    Poisoned,
}

/// Fields supplied when creating a trade. The store assigns `id` and `date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub symbol: String,
    pub pnl: f64,
    pub entry_date: Option<NaiveDateTime>,
    pub exit_date: Option<NaiveDateTime>,
    pub trade_type: Option<TradeType>,
    pub session: Option<Session>,
    pub reward_to_risk_ratio: Option<f64>,
    pub news: Vec<NewsEvent>,
    pub entry_model: Option<String>,
    pub mistakes_made: Option<String>,
    pub lessons_learned: Option<String>,
    pub trade_rating: Option<u8>,
    pub notes: Option<String>,
}

impl NewTrade {
    fn validate(&self) -> Result<(), StoreError> {
        if self.symbol.trim().is_empty() {
            return Err(StoreError::Invalid("symbol is required".into()));
        }
        validate_pnl(self.pnl)
    }

    fn into_trade(self, id: TradeId, created: NaiveDateTime) -> Trade {
        Trade {
            id,
            date: display_date(self.exit_date, self.entry_date, created),
            symbol: self.symbol.trim().to_string(),
            pnl: self.pnl,
            reward_to_risk_ratio: self.reward_to_risk_ratio,
            entry_date: self.entry_date,
            exit_date: self.exit_date,
            session: self.session,
            trade_type: self.trade_type,
            news: self.news,
            entry_model: self.entry_model,
            mistakes_made: self.mistakes_made,
            lessons_learned: self.lessons_learned,
            trade_rating: self.trade_rating,
            notes: self.notes,
        }
    }
}

fn validate_pnl(pnl: f64) -> Result<(), StoreError> {
    if pnl.is_finite() {
        Ok(())
    } else {
        Err(StoreError::Invalid(format!("pnl must be finite, got {pnl}")))
    }
}

/// Partial update. `None` leaves a field unchanged; `id` is never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePatch {
    pub symbol: Option<String>,
    pub pnl: Option<f64>,
    pub entry_date: Option<NaiveDateTime>,
    pub exit_date: Option<NaiveDateTime>,
    pub trade_type: Option<TradeType>,
    pub session: Option<Session>,
    pub reward_to_risk_ratio: Option<f64>,
    pub news: Option<Vec<NewsEvent>>,
    pub entry_model: Option<String>,
    pub mistakes_made: Option<String>,
    pub lessons_learned: Option<String>,
    pub trade_rating: Option<u8>,
    pub notes: Option<String>,
}

impl TradePatch {
    /// Apply the patch in place. The display date is re-derived when entry or exit change.
    pub fn apply(self, trade: &mut Trade, clock: &ReferenceClock) -> Result<(), StoreError> {
        if let Some(pnl) = self.pnl {
            validate_pnl(pnl)?;
            trade.pnl = pnl;
        }
        if let Some(symbol) = self.symbol {
            if symbol.trim().is_empty() {
                return Err(StoreError::Invalid("symbol is required".into()));
            }
            trade.symbol = symbol.trim().to_string();
        }

        let retime = self.entry_date.is_some() || self.exit_date.is_some();
        if let Some(entry) = self.entry_date {
            trade.entry_date = Some(entry);
        }
        if let Some(exit) = self.exit_date {
            trade.exit_date = Some(exit);
        }
        if retime {
            let previous = clock.parse_or_now(&trade.date);
            trade.date = display_date(trade.exit_date, trade.entry_date, previous);
        }

        if let Some(v) = self.trade_type {
            trade.trade_type = Some(v);
        }
        if let Some(v) = self.session {
            trade.session = Some(v);
        }
        if let Some(v) = self.reward_to_risk_ratio {
            trade.reward_to_risk_ratio = Some(v);
        }
        if let Some(v) = self.news {
            trade.news = v;
        }
        if let Some(v) = self.entry_model {
            trade.entry_model = Some(v);
        }
        if let Some(v) = self.mistakes_made {
            trade.mistakes_made = Some(v);
        }
        if let Some(v) = self.lessons_learned {
            trade.lessons_learned = Some(v);
        }
        if let Some(v) = self.trade_rating {
            trade.trade_rating = Some(v);
        }
        if let Some(v) = self.notes {
            trade.notes = Some(v);
        }
        Ok(())
    }
}

/// Per-user trade persistence.
pub trait TradeStore: Send + Sync {
    /// All trades for `user`, in insertion order.
    fn list(&self, user: &UserId) -> Result<Vec<Trade>, StoreError>;

    fn get(&self, user: &UserId, id: &TradeId) -> Result<Trade, StoreError>;

    fn create(&self, user: &UserId, trade: NewTrade) -> Result<Trade, StoreError>;

    fn update(&self, user: &UserId, id: &TradeId, patch: TradePatch) -> Result<Trade, StoreError>;

    fn delete(&self, user: &UserId, id: &TradeId) -> Result<(), StoreError>;
}

/// Mutex-guarded map of user → trades.
#[derive(Debug, Default)]
pub struct InMemoryTradeStore {
    trades: Mutex<BTreeMap<UserId, Vec<Trade>>>,
    clock: Option<ReferenceClock>,
}

impl InMemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose creation timestamps come from a fixed clock.
    pub fn with_clock(clock: ReferenceClock) -> Self {
        Self {
            trades: Mutex::new(BTreeMap::new()),
            clock: Some(clock),
        }
    }

    fn clock(&self) -> ReferenceClock {
        self.clock.unwrap_or_else(ReferenceClock::system)
    }

    fn not_found(user: &UserId, id: &TradeId) -> StoreError {
        StoreError::NotFound {
            user: user.clone(),
            id: id.clone(),
        }
    }
}

impl TradeStore for InMemoryTradeStore {
    fn list(&self, user: &UserId) -> Result<Vec<Trade>, StoreError> {
        let guard = self.trades.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(user).cloned().unwrap_or_default())
    }

    fn get(&self, user: &UserId, id: &TradeId) -> Result<Trade, StoreError> {
        let guard = self.trades.lock().map_err(|_| StoreError::Poisoned)?;
        guard
            .get(user)
            .and_then(|trades| trades.iter().find(|t| &t.id == id))
            .cloned()
            .ok_or_else(|| Self::not_found(user, id))
    }

    fn create(&self, user: &UserId, trade: NewTrade) -> Result<Trade, StoreError> {
        trade.validate()?;
        let created = trade.into_trade(TradeId::random(), self.clock().now());
        let mut guard = self.trades.lock().map_err(|_| StoreError::Poisoned)?;
        guard.entry(user.clone()).or_default().push(created.clone());
        debug!(user = %user, id = %created.id, "trade created");
        Ok(created)
    }

    fn update(&self, user: &UserId, id: &TradeId, patch: TradePatch) -> Result<Trade, StoreError> {
        let clock = self.clock();
        let mut guard = self.trades.lock().map_err(|_| StoreError::Poisoned)?;
        let trade = guard
            .get_mut(user)
            .and_then(|trades| trades.iter_mut().find(|t| &t.id == id))
            .ok_or_else(|| Self::not_found(user, id))?;

        // Patch a copy so a rejected patch leaves the stored trade untouched.
        let mut patched = trade.clone();
        patch.apply(&mut patched, &clock)?;
        *trade = patched.clone();
        debug!(user = %user, id = %id, "trade updated");
        Ok(patched)
    }

    fn delete(&self, user: &UserId, id: &TradeId) -> Result<(), StoreError> {
        let mut guard = self.trades.lock().map_err(|_| StoreError::Poisoned)?;
        let trades = guard
            .get_mut(user)
            .ok_or_else(|| Self::not_found(user, id))?;
        let before = trades.len();
        trades.retain(|t| &t.id != id);
        if trades.len() == before {
            return Err(Self::not_found(user, id));
        }
        debug!(user = %user, id = %id, "trade deleted");
        Ok(())
    }
}
