use std::future::Future;

use votechain_types::ChainSnapshot;

use crate::error::PeerError;

/// Fetches the chain a peer currently publishes.
///
/// `locator` is the raw `host[:port]` the peer was registered under.
pub trait ChainSource: Send + Sync {
    fn fetch_chain(
        &self,
        locator: &str,
    ) -> impl Future<Output = Result<ChainSnapshot, PeerError>> + Send;
}
