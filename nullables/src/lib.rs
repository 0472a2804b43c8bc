//! Nullable infrastructure for deterministic testing.
//!
//! Production code reaches peers through the [`ChainSource`] seam. This crate
//! provides an implementation that:
//! - Serves chains from memory
//! - Can be told to fail the way real peers fail (refused, error status,
//!   garbage body, never answering)
//! - Never touches the network
//!
//! [`ChainSource`]: votechain_consensus::ChainSource

pub mod chain_source;

pub use chain_source::{NullChainSource, NullPeer};
