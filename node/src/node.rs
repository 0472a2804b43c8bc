//! A running votechain node: one ledger served over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use votechain_consensus::{ConsensusResolver, HttpChainSource};
use votechain_ledger::Ledger;
use votechain_rpc::{router, AppState};

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::shutdown::ShutdownController;

/// Owns the ledger state and the HTTP server in front of it.
pub struct VoteNode {
    config: NodeConfig,
    state: AppState<HttpChainSource>,
    pub shutdown: Arc<ShutdownController>,
}

impl VoteNode {
    /// Build a node with a fresh ledger and register the bootstrap peers.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        let mut ledger = Ledger::new();
        for peer in &config.bootstrap_peers {
            ledger
                .enroll_node(&peer.address, peer.government)
                .map_err(|e| NodeError::Config(format!("bootstrap peer {:?}: {e}", peer.address)))?;
        }

        let source = HttpChainSource::new(config.peer_timeout());
        let resolver = ConsensusResolver::with_timeout(source, config.peer_timeout());
        let state = AppState::new(ledger, resolver).with_mine_timeout(config.mine_timeout());

        Ok(Self {
            config,
            state,
            shutdown: Arc::new(ShutdownController::new()),
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Handler state, shared with every request.
    pub fn state(&self) -> &AppState<HttpChainSource> {
        &self.state
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Bind the configured listen address.
    pub async fn bind(&self) -> Result<TcpListener, NodeError> {
        let listener = TcpListener::bind(self.config.listen_addr()).await?;
        Ok(listener)
    }

    /// Serve the API on `listener` until shutdown is triggered.
    ///
    /// On shutdown the server stops accepting connections and any proof
    /// search in progress is cancelled.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), NodeError> {
        let local: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?local, "votechain node listening");

        let shutdown = Arc::clone(&self.shutdown);
        let mining = self.state.shutdown.clone();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                mining.cancel();
            })
            .await
            .map_err(|e| NodeError::Rpc(e.to_string()))?;

        info!("votechain node stopped");
        Ok(())
    }

    /// Bind, serve, and stop on SIGINT/SIGTERM.
    pub async fn run(&self) -> Result<(), NodeError> {
        let listener = self.bind().await?;

        let signals = Arc::clone(&self.shutdown);
        let signal_task = tokio::spawn(async move { signals.wait_for_signal().await });

        let served = self.serve(listener).await;
        signal_task.abort();
        if let Err(e) = &served {
            warn!(error = %e, "server exited with error");
        }
        served
    }
}
