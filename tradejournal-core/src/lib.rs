//! TradeJournal Core — domain types, timestamps, filters, trade store, access policy.
//!
//! This crate holds everything the analytics engine consumes:
//! - Domain types (trades, sessions, sides, news events, ids)
//! - Lenient timestamp parsing against an explicit reference clock
//! - Conversion of loosely-typed store rows into typed trades
//! - Date-range and news-impact filters
//! - The trade store contract and an in-memory implementation
//! - Admin gating for cross-user access
//! - Content fingerprinting of trade collections

pub mod access;
pub mod domain;
pub mod fingerprint;
pub mod filter;
pub mod record;
pub mod store;
pub mod timestamp;

pub use access::{AccessError, AccessPolicy, Principal, Role};
pub use domain::{DatasetHash, NewsEvent, NewsImpact, Session, Trade, TradeId, TradeType, UserId};
pub use filter::{DateRange, NewsFilter};
pub use record::TradeRecord;
pub use store::{InMemoryTradeStore, NewTrade, StoreError, TradePatch, TradeStore};
pub use timestamp::{parse_timestamp, ReferenceClock};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: shared types can cross thread boundaries.
    ///
    /// The admin overview fans out per-user computations on a thread pool.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Trade>();
        require_sync::<Trade>();
        require_send::<TradeRecord>();
        require_sync::<TradeRecord>();
        require_send::<ReferenceClock>();
        require_sync::<ReferenceClock>();
        require_send::<DateRange>();
        require_sync::<DateRange>();
        require_send::<NewsFilter>();
        require_sync::<NewsFilter>();
        require_send::<InMemoryTradeStore>();
        require_sync::<InMemoryTradeStore>();
        require_send::<AccessPolicy>();
        require_sync::<AccessPolicy>();
    }

    #[test]
    fn store_is_object_safe() {
        fn _takes_dyn(store: &dyn TradeStore, user: &UserId) -> Result<Vec<Trade>, StoreError> {
            store.list(user)
        }
    }
}
