//! Domain types for the trading journal.

pub mod ids;
pub mod news;
pub mod session;
pub mod trade;

pub use ids::{DatasetHash, TradeId, UserId};
pub use news::{NewsEvent, NewsImpact};
pub use session::{Session, TradeType};
pub use trade::{display_date, Trade};
