//! Pre-built [`tracing::Span`] constructors for node operations.
//!
//! Consistent span names and field sets make it easy to filter and
//! correlate log lines for one request.

use tracing::{info_span, Span};

/// Span covering a single HTTP route handled by the node.
pub fn rpc_span(route: &str) -> Span {
    info_span!("rpc", route = %route)
}

/// Span covering one `/mine` request, including retries after the tip moves.
pub fn mine_span(tip_index: u64) -> Span {
    info_span!("mine", tip = tip_index)
}

/// Span covering one consensus round.
pub fn resolve_span(peer_count: usize) -> Span {
    info_span!("resolve", peers = peer_count)
}
