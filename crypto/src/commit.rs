//! Block commitments: the digest linking each block to its successor.

use serde_json::Value;
use votechain_types::{Block, BlockHash};

use crate::canonical::canonical_json;
use crate::hash::sha256_hex;

/// SHA-256 of the canonical JSON encoding of `value`.
pub fn hash_value(value: &Value) -> BlockHash {
    BlockHash::new(sha256_hex(canonical_json(value).as_bytes()))
}

/// Deterministic digest of a block's logical content.
///
/// Depends only on field values, never on the order fields were serialized
/// or constructed in.
pub fn hash_block(block: &Block) -> BlockHash {
    let value = serde_json::to_value(block).expect("Block always serializes to a JSON value");
    hash_value(&value)
}
