//! Fundamental types for the votechain ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! blocks, vote transactions, role-tagged addresses, digests, timestamps and the
//! chain snapshot exchanged between peers.

pub mod address;
pub mod block;
pub mod chain;
pub mod error;
pub mod time;
pub mod transaction;

pub use address::{parse_locator, Role, TaggedAddress};
pub use block::{Block, BlockHash};
pub use chain::ChainSnapshot;
pub use error::AddressError;
pub use time::Timestamp;
pub use transaction::Transaction;
