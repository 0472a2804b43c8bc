//! The `{chain, length}` document a node publishes to its peers.

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// A full copy of a node's chain as served on `GET /chain`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainSnapshot {
    pub fn from_chain(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }

    /// Whether the advertised length matches the blocks actually sent.
    pub fn is_consistent(&self) -> bool {
        self.length == self.chain.len()
    }
}
