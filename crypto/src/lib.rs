//! Hashing primitives for the votechain ledger.
//!
//! - **SHA-256** for every digest in the system
//! - **Canonical JSON** so a block hashes the same regardless of field order
//! - **Anonymization** of role-tagged addresses (tag kept, locator digested)

pub mod anonymize;
pub mod canonical;
pub mod commit;
pub mod hash;

pub use anonymize::anonymize;
pub use canonical::{canonical_json, sort_keys};
pub use commit::{hash_block, hash_value};
pub use hash::{sha256, sha256_hex};
