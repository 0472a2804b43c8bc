//! Vote transactions.

use serde::{Deserialize, Serialize};

use crate::address::TaggedAddress;

/// A one-token transfer naming a ballot candidate.
///
/// Faucet grants use the system sender and an empty `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: TaggedAddress,
    pub recipient: TaggedAddress,
    pub amount: i64,
    pub name: String,
}

impl Transaction {
    pub fn new(
        sender: TaggedAddress,
        recipient: TaggedAddress,
        amount: i64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            recipient,
            amount,
            name: name.into(),
        }
    }

    /// Whether this is a faucet grant rather than a vote.
    pub fn is_faucet(&self) -> bool {
        self.sender.is_system()
    }
}
