//! Chain validation.
//!
//! Checks an arbitrary candidate chain, typically one received from a peer,
//! without touching any ledger state.

use thiserror::Error;
use votechain_crypto::hash_block;
use votechain_types::Block;
use votechain_work::valid_proof;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("chain has no blocks")]
    Empty,

    #[error("block {index} does not link to the digest of its predecessor")]
    BrokenLink { index: u64 },

    #[error("block {index} carries an invalid proof of work")]
    InvalidProof { index: u64 },
}

/// Walk `chain` pairwise from the first block, re-deriving each link digest
/// and proof check. Stops at the first violation.
///
/// A single-block chain is valid.
pub fn validate_chain(chain: &[Block]) -> Result<(), ChainError> {
    if chain.is_empty() {
        return Err(ChainError::Empty);
    }

    for pair in chain.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        let previous_hash = hash_block(previous);

        if current.previous_hash != previous_hash {
            return Err(ChainError::BrokenLink {
                index: current.index,
            });
        }
        if !valid_proof(previous.proof, current.proof, &previous_hash) {
            return Err(ChainError::InvalidProof {
                index: current.index,
            });
        }
    }
    Ok(())
}

pub fn is_valid(chain: &[Block]) -> bool {
    validate_chain(chain).is_ok()
}
