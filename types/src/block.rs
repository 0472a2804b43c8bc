//! Blocks and block digests.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::Timestamp;
use crate::transaction::Transaction;

/// Hex digest of a block's canonical content, or the genesis sentinel `"1"`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHash(String);

impl BlockHash {
    /// The `previous_hash` carried by the genesis block.
    pub const GENESIS_SENTINEL: &'static str = "1";

    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn genesis_sentinel() -> Self {
        Self(Self::GENESIS_SENTINEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_genesis_sentinel(&self) -> bool {
        self.0 == Self::GENESIS_SENTINEL
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.0.get(..8).unwrap_or(&self.0);
        write!(f, "BlockHash({short}\u{2026})")
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A committed batch of transactions linked to its predecessor.
///
/// `index` is the block's 1-based position in the chain. Blocks are never
/// mutated once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: Timestamp,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: BlockHash,
}

impl Block {
    pub fn is_genesis(&self) -> bool {
        self.index == 1
    }
}
