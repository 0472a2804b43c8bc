//! HTTP API for a votechain node.
//!
//! Provides endpoints for:
//! - Ballot management (`/add_candidate`) and tabulation (`/tabulate`)
//! - Vote submission (`/transactions/new`)
//! - Mining (`/mine`)
//! - Node registration (`/nodes/register`) and consensus (`/nodes/resolve`)
//! - Chain export for peers (`/chain`)

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
pub mod tracing_spans;

pub use error::RpcError;
pub use server::router;
pub use state::AppState;
