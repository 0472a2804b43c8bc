//! Nullable chain source: answer peer fetches from a scripted table.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use votechain_consensus::{ChainSource, PeerError};
use votechain_types::{Block, ChainSnapshot};

/// How a scripted peer answers.
#[derive(Clone, Debug)]
pub enum NullPeer {
    /// Serves this snapshot as-is, consistent or not.
    Chain(ChainSnapshot),
    /// Connection refused.
    Unreachable,
    /// Answers with a non-success HTTP status.
    Status(u16),
    /// Answers with a body that is not a chain.
    Malformed,
    /// Never answers.
    Hang,
}

/// A chain source that records fetches instead of making them.
///
/// Locators with no scripted answer behave as [`NullPeer::Unreachable`].
#[derive(Debug, Default)]
pub struct NullChainSource {
    peers: Mutex<HashMap<String, NullPeer>>,
    /// Every locator fetched, in call order.
    polled: Mutex<Vec<String>>,
}

impl NullChainSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `locator` to answer with `peer`.
    pub fn with_peer(self, locator: impl Into<String>, peer: NullPeer) -> Self {
        self.set_peer(locator, peer);
        self
    }

    /// Script `locator` to serve `chain`.
    pub fn with_chain(self, locator: impl Into<String>, chain: Vec<Block>) -> Self {
        self.with_peer(locator, NullPeer::Chain(ChainSnapshot::from_chain(chain)))
    }

    pub fn set_peer(&self, locator: impl Into<String>, peer: NullPeer) {
        self.peers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(locator.into(), peer);
    }

    /// Locators fetched so far (for assertions).
    pub fn polled(&self) -> Vec<String> {
        self.polled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clear all state.
    pub fn reset(&self) {
        self.peers.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.polled.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn answer_for(&self, locator: &str) -> NullPeer {
        self.polled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locator.to_string());
        self.peers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locator)
            .cloned()
            .unwrap_or(NullPeer::Unreachable)
    }
}

impl ChainSource for NullChainSource {
    async fn fetch_chain(&self, locator: &str) -> Result<ChainSnapshot, PeerError> {
        match self.answer_for(locator) {
            NullPeer::Chain(snapshot) => Ok(snapshot),
            NullPeer::Unreachable => Err(PeerError::Unreachable(format!(
                "connection failed: {locator} refused"
            ))),
            NullPeer::Status(code) => Err(PeerError::RequestFailed(format!("HTTP status {code}"))),
            NullPeer::Malformed => Err(PeerError::InvalidResponse(
                "failed to parse chain response".to_string(),
            )),
            NullPeer::Hang => std::future::pending().await,
        }
    }
}
