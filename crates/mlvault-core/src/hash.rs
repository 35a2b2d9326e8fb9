//! Locally computed content hashes.
//!
//! [`ContentHash`] identifies the exact bytes of a serialized model payload.
//! It is deliberately a distinct type from the store-reported integrity tag
//! attached to dataset artifacts: the two are produced by different
//! algorithms and must never be compared to each other.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of a byte payload.
///
/// Hashing the same bytes always yields the same value, so equality of
/// hashes implies equality of the serialized payloads they were computed
/// over.
///
/// # Example
///
/// ```
/// use mlvault_core::hash::ContentHash;
///
/// let a = ContentHash::of(b"model bytes");
/// let b = ContentHash::of(b"model bytes");
/// assert_eq!(a, b);
/// assert_eq!(a.as_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Computes the hash of the given bytes.
    #[must_use]
    pub fn of(bytes: impl AsRef<[u8]>) -> Self {
        let digest = Sha256::digest(bytes.as_ref());
        Self(hex::encode(digest))
    }

    /// Wraps an already-encoded hex digest, e.g. one read back from a
    /// manifest.
    #[must_use]
    pub fn from_hex(hex_digest: impl Into<String>) -> Self {
        Self(hex_digest.into())
    }

    /// Returns the digest as a hex string.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
