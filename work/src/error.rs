use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    #[error("proof search cancelled")]
    Cancelled,

    #[error("proof search exceeded its deadline")]
    DeadlineExceeded,

    #[error("proof space exhausted without a solution")]
    Exhausted,
}
