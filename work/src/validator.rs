//! PoW validation.

use votechain_crypto::sha256_hex;
use votechain_types::BlockHash;

/// Leading hex characters a valid proof digest must start with.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Hex digest of the text `"{last_proof}{proof}{last_hash}"`.
pub fn proof_digest(last_proof: u64, proof: u64, last_hash: &BlockHash) -> String {
    let guess = format!("{last_proof}{proof}{last_hash}");
    sha256_hex(guess.as_bytes())
}

/// Whether `proof` solves the puzzle posed by the previous block.
pub fn valid_proof(last_proof: u64, proof: u64, last_hash: &BlockHash) -> bool {
    proof_digest(last_proof, proof, last_hash).starts_with(DIFFICULTY_PREFIX)
}
