//! Content hash computation for change detection.

use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// SHA256 digest of a file's raw bytes, stored as a 64-character lowercase
/// hex string.
///
/// The hash is the only signal used to decide whether a note needs
/// re-extraction; it is always computed from the bytes exactly as they sit
/// on disk, so encoding quirks (BOM, line endings) count as changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

/// Error when rehydrating a content hash from its stored hex form.
#[derive(Debug, Error)]
#[error("invalid content digest '{0}': expected 64 lowercase hex characters")]
pub struct InvalidDigest(String);

impl ContentHash {
    /// Computes the SHA256 hash of the given bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(format!("{:x}", digest))
    }

    /// Parses a hash previously produced by [`ContentHash::as_str`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDigest`] unless the input is exactly 64 hex
    /// characters. Uppercase input is normalized to lowercase.
    pub fn from_hex(hex: &str) -> Result<Self, InvalidDigest> {
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidDigest(hex.to_string()));
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Returns the digest as a hex string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
