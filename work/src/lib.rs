//! Proof-of-work for block creation.
//!
//! A proof is valid when `SHA-256(last_proof ‖ proof ‖ last_hash)`, taken as
//! decimal and hex text, starts with [`DIFFICULTY_PREFIX`]. Difficulty is fixed;
//! there is no retargeting.

pub mod cancel;
pub mod error;
pub mod generator;
pub mod validator;

pub use cancel::CancelToken;
pub use error::WorkError;
pub use generator::ProofOfWork;
pub use validator::{proof_digest, valid_proof, DIFFICULTY_PREFIX};
