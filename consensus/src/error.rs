use thiserror::Error;

/// Why a peer did not contribute a candidate chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    #[error("peer unreachable: {0}")]
    Unreachable(String),

    #[error("peer did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
