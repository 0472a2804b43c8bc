//! PoW search (multi-threaded CPU).

use rayon::prelude::*;

use crate::validator::valid_proof;
use crate::{CancelToken, WorkError};
use votechain_crypto::hash_block;
use votechain_types::{Block, BlockHash};

/// Candidates tested per parallel batch before checking the cancel token.
const BATCH_SIZE: u64 = 16_384;

/// Searches for the smallest proof that solves a block's puzzle.
///
/// Candidates are scanned in ascending batches. Each batch is split across
/// the rayon pool and `find_first` keeps the lowest solution in the batch,
/// so the result is identical to a sequential scan from zero.
#[derive(Clone, Copy, Debug)]
pub struct ProofOfWork {
    batch_size: u64,
}

impl ProofOfWork {
    pub fn new() -> Self {
        Self {
            batch_size: BATCH_SIZE,
        }
    }

    /// Smaller batches react to cancellation sooner at some throughput cost.
    pub fn with_batch_size(batch_size: u64) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Find the proof for the block that will follow `last_block`.
    pub fn mine(&self, last_block: &Block, token: &CancelToken) -> Result<u64, WorkError> {
        self.mine_from(last_block.proof, &hash_block(last_block), token)
    }

    /// Find the smallest `proof` with `valid_proof(last_proof, proof, last_hash)`.
    ///
    /// Blocks the calling thread until a solution is found or `token` fires.
    pub fn mine_from(
        &self,
        last_proof: u64,
        last_hash: &BlockHash,
        token: &CancelToken,
    ) -> Result<u64, WorkError> {
        let mut start = 0u64;
        loop {
            token.check()?;

            let end = start.saturating_add(self.batch_size);
            let found = (start..end)
                .into_par_iter()
                .find_first(|&candidate| valid_proof(last_proof, candidate, last_hash));
            if let Some(proof) = found {
                return Ok(proof);
            }
            if end == u64::MAX {
                return Err(WorkError::Exhausted);
            }
            start = end;
        }
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new()
    }
}
