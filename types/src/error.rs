//! Address parsing errors.

use thiserror::Error;

/// Raised when a node locator or tagged address cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid URL: {0:?} has no network location")]
    EmptyLocator(String),

    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("unknown role tag {tag:?} in address {address:?}")]
    UnknownRole { tag: char, address: String },

    #[error("address is empty")]
    Empty,
}
