//! Trading sessions and trade direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named trading window used to bucket trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Session {
    #[serde(rename = "Asia")]
    Asia,
    #[serde(rename = "London")]
    London,
    #[serde(rename = "NY AM")]
    NyAm,
    #[serde(rename = "NY PM")]
    NyPm,
}

impl Session {
    /// All sessions in chronological order through the trading day.
    pub const ALL: [Session; 4] = [Session::Asia, Session::London, Session::NyAm, Session::NyPm];

    pub fn label(&self) -> &'static str {
        match self {
            Session::Asia => "Asia",
            Session::London => "London",
            Session::NyAm => "NY AM",
            Session::NyPm => "NY PM",
        }
    }

    /// Lenient parse: case-insensitive, ignores spaces, underscores and dashes.
    ///
    /// Accepts "NY AM", "ny_am", "NYAM", "new york am", etc.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "asia" | "asian" | "tokyo" => Some(Session::Asia),
            "london" | "ldn" => Some(Session::London),
            "nyam" | "newyorkam" => Some(Session::NyAm),
            "nypm" | "newyorkpm" => Some(Session::NyPm),
            _ => None,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Long,
    Short,
}

impl TradeType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "long" | "buy" => Some(TradeType::Long),
            "short" | "sell" => Some(TradeType::Short),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradeType::Long => "long",
            TradeType::Short => "short",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
