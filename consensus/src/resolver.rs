//! Peer polling and chain replacement.

use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use votechain_ledger::{validate_chain, validate_positions, Ledger, LedgerError};
use votechain_types::{Block, ChainSnapshot};

use crate::error::PeerError;
use crate::source::ChainSource;

/// Bound on a single peer fetch when none is configured.
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(5);

/// What a resolve round did to the local chain.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// A peer's longer valid chain was adopted.
    Replaced { chain: Vec<Block>, from_peer: String },
    /// No peer offered a qualifying chain; ours stands.
    Authoritative { chain: Vec<Block> },
}

impl Resolution {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }

    pub fn chain(&self) -> &[Block] {
        match self {
            Self::Replaced { chain, .. } | Self::Authoritative { chain } => chain,
        }
    }
}

/// Polls peers through a [`ChainSource`] and keeps the longest valid chain.
///
/// Peers are polled concurrently, each bounded by `peer_timeout`. Candidates
/// are ranked in the order peers were given, so among equally long chains
/// the first peer wins.
pub struct ConsensusResolver<S> {
    source: S,
    peer_timeout: Duration,
}

impl<S: ChainSource> ConsensusResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_timeout(source, DEFAULT_PEER_TIMEOUT)
    }

    pub fn with_timeout(source: S, peer_timeout: Duration) -> Self {
        Self {
            source,
            peer_timeout,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn peer_timeout(&self) -> Duration {
        self.peer_timeout
    }

    /// The longest valid chain among `peers` that beats `local_len`, with the
    /// locator that served it.
    pub async fn best_candidate(
        &self,
        local_len: usize,
        peers: &[String],
    ) -> Option<(String, Vec<Block>)> {
        let fetches = peers.iter().map(|peer| self.poll_peer(peer));
        let responses = join_all(fetches).await;

        let mut best: Option<(String, Vec<Block>)> = None;
        for (peer, response) in peers.iter().zip(responses) {
            let snapshot = match response {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(peer = %peer, reason = %e, "peer skipped");
                    continue;
                }
            };

            let floor = best.as_ref().map_or(local_len, |(_, chain)| chain.len());
            if snapshot.length <= floor {
                debug!(peer = %peer, length = snapshot.length, "peer chain not longer");
                continue;
            }
            if let Err(e) = validate_chain(&snapshot.chain) {
                warn!(peer = %peer, reason = %e, "peer chain invalid");
                continue;
            }
            if let Err(e) = validate_positions(&snapshot.chain) {
                warn!(peer = %peer, reason = %e, "peer chain misnumbered");
                continue;
            }
            best = Some((peer.clone(), snapshot.chain));
        }
        best
    }

    /// Run one resolve round against every node registered in `ledger`.
    ///
    /// The lock is released while peers are polled. The winning chain is
    /// only adopted if it is still strictly longer than the local chain
    /// once the lock is retaken.
    pub async fn resolve(&self, ledger: &Mutex<Ledger>) -> Resolution {
        let (local_len, peers) = {
            let ledger = ledger.lock().await;
            (ledger.len(), ledger.nodes().locators())
        };
        debug!(peers = peers.len(), local_length = local_len, "resolving chain");

        let candidate = self.best_candidate(local_len, &peers).await;

        let mut ledger = ledger.lock().await;
        if let Some((peer, chain)) = candidate {
            match ledger.replace_chain(chain) {
                Ok(()) => {
                    info!(peer = %peer, length = ledger.len(), "adopted peer chain");
                    return Resolution::Replaced {
                        chain: ledger.chain().to_vec(),
                        from_peer: peer,
                    };
                }
                Err(LedgerError::ChainNotLonger { local, candidate }) => {
                    debug!(peer = %peer, local, candidate, "local chain grew while polling");
                }
                Err(e) => warn!(peer = %peer, error = %e, "peer chain rejected"),
            }
        }
        Resolution::Authoritative {
            chain: ledger.chain().to_vec(),
        }
    }

    async fn poll_peer(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let snapshot = tokio::time::timeout(self.peer_timeout, self.source.fetch_chain(peer))
            .await
            .map_err(|_| PeerError::Timeout(self.peer_timeout))??;
        if !snapshot.is_consistent() {
            return Err(PeerError::InvalidResponse(format!(
                "advertised length {} but sent {} blocks",
                snapshot.length,
                snapshot.chain.len()
            )));
        }
        Ok(snapshot)
    }
}
