//! SHA-256 helpers.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Lowercase hex encoding of the SHA-256 digest (64 characters).
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
