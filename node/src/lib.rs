//! votechain node: wires a [`Ledger`](votechain_ledger::Ledger) to the
//! HTTP API and runs it.
//!
//! The node:
//! - Loads its [`NodeConfig`] from TOML
//! - Installs structured logging
//! - Registers bootstrap peers
//! - Serves the API until SIGINT/SIGTERM, then cancels in-flight mining

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use config::{BootstrapPeer, NodeConfig};
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::VoteNode;
pub use shutdown::ShutdownController;
