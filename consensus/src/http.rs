//! HTTP client for fetching peer chains.

use std::time::Duration;

use votechain_types::ChainSnapshot;

use crate::error::PeerError;
use crate::source::ChainSource;

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Sends `GET http://{locator}/chain` and parses the `{chain, length}` body.
#[derive(Clone, Debug)]
pub struct HttpChainSource {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
}

impl HttpChainSource {
    /// A source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .build()
            .unwrap_or_default();
        Self { http_client }
    }

    fn chain_url(locator: &str) -> String {
        format!("http://{}/chain", locator.trim_end_matches('/'))
    }
}

impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, locator: &str) -> Result<ChainSnapshot, PeerError> {
        let url = Self::chain_url(locator);
        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                PeerError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                PeerError::Unreachable(format!("connection failed: {e}"))
            } else {
                PeerError::RequestFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(PeerError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let snapshot: ChainSnapshot = response.json().await.map_err(|e| {
            PeerError::InvalidResponse(format!("failed to parse chain response: {e}"))
        })?;

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
