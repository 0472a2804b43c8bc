//! RPC error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use votechain_work::WorkError;

#[derive(Debug, Error)]
pub enum RpcError {
    /// Missing or malformed request fields. The text is shown to the caller.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Error: Please supply a valid node // 'address', 'type' ({0})")]
    InvalidAddress(String),

    #[error("mining cancelled: {0}")]
    MiningCancelled(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            Self::MiningCancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WorkError> for RpcError {
    fn from(e: WorkError) -> Self {
        match e {
            WorkError::Cancelled | WorkError::DeadlineExceeded => {
                RpcError::MiningCancelled(e.to_string())
            }
            other => RpcError::Internal(other.to_string()),
        }
    }
}

impl From<votechain_ledger::LedgerError> for RpcError {
    fn from(e: votechain_ledger::LedgerError) -> Self {
        match e {
            votechain_ledger::LedgerError::InvalidAddress(inner) => {
                RpcError::InvalidAddress(inner.to_string())
            }
            other => RpcError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
