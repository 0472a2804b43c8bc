//! Graceful shutdown controller for the votechain node.
//!
//! Listens for SIGINT/SIGTERM and broadcasts a shutdown signal to every
//! subscriber via a `tokio::sync::broadcast` channel.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Coordinates graceful shutdown of the HTTP server and in-flight mining.
///
/// Subsystems call [`subscribe`](Self::subscribe) to get a receiver. When
/// shutdown is triggered (by OS signal or programmatically), every receiver
/// is notified. Subscribing after the trigger still observes it.
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
    triggered: AtomicBool,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: AtomicBool::new(false),
        }
    }

    /// Get a receiver that will be notified on shutdown.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        let _ = self.tx.send(());
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Resolve once shutdown has been triggered.
    pub async fn wait(&self) {
        let mut rx = self.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }

    /// Wait for SIGTERM or SIGINT, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { info!("received SIGINT, shutting down"); }
            _ = terminate => { info!("received SIGTERM, shutting down"); }
        }

        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
