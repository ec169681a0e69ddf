use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque trade identifier, assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TradeId(pub String);

impl TradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random 128-bit id, hex encoded.
    pub fn random() -> Self {
        let bytes: [u8; 16] = rand::random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Stable id for a row that arrived without one, from its content and file position.
    pub fn derived(content: &[u8], row: usize) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(content);
        hasher.update(&(row as u64).to_le_bytes());
        let hex = hasher.finalize().to_hex();
        Self(format!("row-{}", &hex.as_str()[..16]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of a set of trades.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content hash of a trade collection (BLAKE3, hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// First 12 hex characters, used for directory names.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_trade_ids_are_unique_hex() {
        let a = TradeId::random();
        let b = TradeId::random();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn dataset_hash_is_deterministic() {
        assert_eq!(DatasetHash::from_bytes(b"abc"), DatasetHash::from_bytes(b"abc"));
        assert_ne!(DatasetHash::from_bytes(b"abc"), DatasetHash::from_bytes(b"abd"));
    }

    #[test]
    fn short_hash_is_twelve_chars() {
        let h = DatasetHash::from_bytes(b"trades");
        assert_eq!(h.short().len(), 12);
        assert!(h.0.starts_with(h.short()));
    }

    #[test]
    fn short_hash_tolerates_foreign_strings() {
        assert_eq!(DatasetHash("abc".into()).short(), "abc");
        // Byte 12 falls inside the multi-byte 'é'.
        let odd = DatasetHash("abcdefghijké-rest".into());
        assert_eq!(odd.short(), "abcdefghijké-rest");
    }

    #[test]
    fn derived_trade_ids_are_stable() {
        assert_eq!(TradeId::derived(b"row", 3), TradeId::derived(b"row", 3));
        assert_ne!(TradeId::derived(b"row", 3), TradeId::derived(b"row", 4));
        assert_eq!(TradeId::derived(b"row", 0).as_str().len(), 20);
    }
}
