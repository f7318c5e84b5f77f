//! Structural content hashing
//!
//! Provides [`ContentHash`], a 32-byte BLAKE3 digest of a node's canonical
//! string. Two trees with the same content have the same hash regardless
//! of object identity.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte content hash (BLAKE3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hash arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self::new(*blake3::hash(data).as_bytes())
    }

    /// Hash a canonical string
    #[inline]
    #[must_use]
    pub fn of_canonical(canonical: &str) -> Self {
        Self::compute(canonical.as_bytes())
    }

    /// First 16 hex characters
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ContentHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| HashError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl serde::Serialize for ContentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ContentHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors parsing a [`ContentHash`]
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Wrong digest length
    #[error("invalid hash length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Not hex
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_canonical_same_hash() {
        let a = ContentHash::of_canonical("ConfigItem(value=1)");
        let b = ContentHash::of_canonical("ConfigItem(value=1)");
        let c = ContentHash::of_canonical("ConfigItem(value=1.0)");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_parse_round_trip() {
        let hash = ContentHash::compute(b"scenario");
        let parsed: ContentHash = hash.to_string().parse().unwrap();
        assert_eq!(hash, parsed);
        assert_eq!(hash.short().len(), 16);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let result = "abcd".parse::<ContentHash>();
        assert!(matches!(result, Err(HashError::InvalidLength { actual: 2, .. })));
    }
}
