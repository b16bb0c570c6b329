//! Digest helpers for opaque tokens
//!
//! Session tokens are never stored in plain text. The database keeps the
//! SHA-256 digest and every lookup digests the presented token first.

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of `data`
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_ref());
    hex::encode(hasher.finalize())
}

/// Digest a bearer token for storage or lookup
pub fn token_digest(token: &str) -> String {
    sha256_hex(token.trim())
}
