use thiserror::Error;

use crate::validator::ChainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    InvalidAddress(#[from] votechain_types::AddressError),

    #[error("invalid chain: {0}")]
    InvalidChain(#[from] ChainError),

    #[error("block at position {position} carries index {index}")]
    IndexMismatch { position: u64, index: u64 },

    #[error("candidate chain of length {candidate} is not longer than local chain of length {local}")]
    ChainNotLonger { local: usize, candidate: usize },
}
