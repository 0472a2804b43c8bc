//! In-memory vote ledger.
//!
//! A single ordered chain of blocks plus the state needed to admit votes into
//! it: the pending buffer, the raw audit log used for tabulation, the ballot
//! and the registry of known nodes. Nothing is persisted.

pub mod admission;
pub mod error;
pub mod genesis;
pub mod ledger;
pub mod registry;
pub mod tally;
pub mod validator;

pub use admission::{AdmissionOutcome, RejectReason, REJECTION_MESSAGE, VOTE_AMOUNT};
pub use error::LedgerError;
pub use genesis::{genesis_block, GENESIS_PROOF};
pub use ledger::{validate_positions, Ledger};
pub use registry::NodeRegistry;
pub use tally::Tally;
pub use validator::{is_valid, validate_chain, ChainError};
