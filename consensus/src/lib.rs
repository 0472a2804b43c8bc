//! Consensus by longest valid chain.
//!
//! A node polls every peer it knows for its `{chain, length}` snapshot and
//! adopts the longest chain that is strictly longer than its own and passes
//! chain validation. Peers that fail in any way are skipped.
//!
//! ## Module overview
//!
//! - [`source`]: The [`ChainSource`] seam peers are fetched through.
//! - [`http`]: [`HttpChainSource`], the reqwest-backed production source.
//! - [`resolver`]: [`ConsensusResolver`] and its [`Resolution`].
//! - [`error`]: Per-peer failure kinds.

pub mod error;
pub mod http;
pub mod resolver;
pub mod source;

pub use error::PeerError;
pub use http::HttpChainSource;
pub use resolver::{ConsensusResolver, Resolution, DEFAULT_PEER_TIMEOUT};
pub use source::ChainSource;
