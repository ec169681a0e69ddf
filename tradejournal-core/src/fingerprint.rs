//! Content fingerprint of a trade collection.
//!
//! Trades are hashed in id order so the fingerprint does not depend on the
//! order the store returned them in.

use std::io::Write;

use tracing::warn;

use crate::domain::{DatasetHash, Trade};

pub fn dataset_hash(trades: &[Trade]) -> DatasetHash {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.date.cmp(&b.date)));

    let mut hasher = blake3::Hasher::new();
    for trade in sorted {
        if let Err(e) = serde_json::to_writer(&mut hasher, trade) {
            warn!(id = %trade.id, error = %e, "trade skipped in fingerprint");
            continue;
        }
        // Record separator keeps adjacent trades from aliasing.
        let _ = hasher.write_all(b"\n");
    }
    DatasetHash(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_independent() {
        let a = Trade::new("a", "2024-01-01", "ES", 1.0);
        let b = Trade::new("b", "2024-01-02", "NQ", -1.0);
        assert_eq!(
            dataset_hash(&[a.clone(), b.clone()]),
            dataset_hash(&[b, a])
        );
    }

    #[test]
    fn content_sensitive() {
        let a = Trade::new("a", "2024-01-01", "ES", 1.0);
        let mut a2 = a.clone();
        a2.pnl = 2.0;
        assert_ne!(dataset_hash(&[a]), dataset_hash(&[a2]));
    }

    #[test]
    fn empty_collection_hashes() {
        let h = dataset_hash(&[]);
        assert_eq!(h.0.len(), 64);
    }
}
