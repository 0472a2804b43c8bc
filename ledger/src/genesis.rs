//! Genesis block creation.
//!
//! Every ledger starts from a block with index 1, no transactions, proof
//! [`GENESIS_PROOF`] and the sentinel `previous_hash` `"1"`. Its timestamp is
//! the moment the ledger was created, so independent nodes have distinct
//! genesis digests.

use votechain_types::{Block, BlockHash, Timestamp};

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Build a genesis block stamped at `timestamp`.
pub fn genesis_block(timestamp: Timestamp) -> Block {
    Block {
        index: 1,
        timestamp,
        transactions: Vec::new(),
        proof: GENESIS_PROOF,
        previous_hash: BlockHash::genesis_sentinel(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_shape() {
        let g = genesis_block(Timestamp::new(5.0));
        assert_eq!(g.index, 1);
        assert_eq!(g.proof, 100);
        assert!(g.previous_hash.is_genesis_sentinel());
        assert!(g.transactions.is_empty());
        assert!(g.is_genesis());
    }
}
