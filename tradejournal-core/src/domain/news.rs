//! Economic news events attached to a trade.

use serde::{Deserialize, Serialize};

/// Impact rating of a news event, as color-coded on economic calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewsImpact {
    Red,
    Orange,
    Yellow,
    Grey,
    NoNews,
}

impl NewsImpact {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "red" | "high" => Some(NewsImpact::Red),
            "orange" | "medium" => Some(NewsImpact::Orange),
            "yellow" | "low" => Some(NewsImpact::Yellow),
            "grey" | "gray" => Some(NewsImpact::Grey),
            "no-news" | "no_news" | "none" => Some(NewsImpact::NoNews),
            _ => None,
        }
    }
}

/// A scheduled news release near the trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    #[serde(rename = "type")]
    pub impact: NewsImpact,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time: String,
}
