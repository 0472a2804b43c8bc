//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use votechain_consensus::ConsensusResolver;
use votechain_ledger::Ledger;
use votechain_work::{CancelToken, ProofOfWork};

/// Everything a request handler can reach.
///
/// The ledger sits behind an async mutex; handlers never hold it across
/// proof search or peer polling.
pub struct AppState<S> {
    pub ledger: Arc<Mutex<Ledger>>,
    pub resolver: Arc<ConsensusResolver<S>>,
    pub pow: ProofOfWork,
    /// Tripped on shutdown; every mining run derives its token from it.
    pub shutdown: CancelToken,
    /// Upper bound on a single `/mine` search. `None` searches until solved.
    pub mine_timeout: Option<Duration>,
}

impl<S> AppState<S> {
    pub fn new(ledger: Ledger, resolver: ConsensusResolver<S>) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            resolver: Arc::new(resolver),
            pow: ProofOfWork::new(),
            shutdown: CancelToken::new(),
            mine_timeout: None,
        }
    }

    pub fn with_mine_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.mine_timeout = timeout;
        self
    }

    pub fn with_pow(mut self, pow: ProofOfWork) -> Self {
        self.pow = pow;
        self
    }

    /// Token for one mining run.
    pub fn mining_token(&self) -> CancelToken {
        match self.mine_timeout {
            Some(timeout) => self.shutdown.with_timeout(timeout),
            None => self.shutdown.clone(),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            resolver: Arc::clone(&self.resolver),
            pow: self.pow,
            shutdown: self.shutdown.clone(),
            mine_timeout: self.mine_timeout,
        }
    }
}
