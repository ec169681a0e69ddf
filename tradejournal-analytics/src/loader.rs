//! Trade file loading.
//!
//! Accepts the store's row shape as either a JSON array (or an object with a
//! `trades` array) or a CSV file with camelCase headers. CSV files cannot
//! carry news events.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use tradejournal_core::{ReferenceClock, Trade, TradeRecord, UserId};

/// Owner assigned to rows without a `userId`.
pub const UNASSIGNED_USER: &str = "unassigned";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unsupported trade file '{0}' (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTrades {
    List(Vec<TradeRecord>),
    Wrapped { trades: Vec<TradeRecord> },
}

/// Raw rows from a trade file.
pub fn load_records(path: &Path) -> Result<Vec<TradeRecord>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let records = match ext.as_deref() {
        Some("json") => {
            let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_json(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        Some("csv") => {
            let csv_err = |source| LoadError::Csv {
                path: path.to_path_buf(),
                source,
            };
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_path(path)
                .map_err(csv_err)?;
            reader
                .deserialize()
                .collect::<Result<Vec<TradeRecord>, _>>()
                .map_err(csv_err)?
        }
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(path = %path.display(), rows = records.len(), "loaded trade file");
    Ok(records)
}

/// Parse the JSON trade file shape.
pub fn parse_json(content: &str) -> Result<Vec<TradeRecord>, serde_json::Error> {
    Ok(match serde_json::from_str::<JsonTrades>(content)? {
        JsonTrades::List(records) => records,
        JsonTrades::Wrapped { trades } => trades,
    })
}

/// Typed trades from a file, in file order.
pub fn load_trades(path: &Path, clock: &ReferenceClock) -> Result<Vec<Trade>, LoadError> {
    Ok(load_records(path)?
        .into_iter()
        .enumerate()
        .map(|(row, r)| r.into_trade_at(row, clock))
        .collect())
}

/// Typed trades grouped by owner. Rows without an owner go to [`UNASSIGNED_USER`].
pub fn load_journals(
    path: &Path,
    clock: &ReferenceClock,
) -> Result<BTreeMap<UserId, Vec<Trade>>, LoadError> {
    let mut journals: BTreeMap<UserId, Vec<Trade>> = BTreeMap::new();
    for (row, record) in load_records(path)?.into_iter().enumerate() {
        let owner = record
            .owner()
            .unwrap_or_else(|| UserId::new(UNASSIGNED_USER));
        journals
            .entry(owner)
            .or_default()
            .push(record.into_trade_at(row, clock));
    }
    Ok(journals)
}
