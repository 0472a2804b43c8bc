//! Vote admission rules.
//!
//! A vote is a one-token transfer from a registered civilian to a registered
//! government node naming a candidate on the ballot. Every voter gets one vote
//! for the life of the ledger. Callers only ever see a generic rejection;
//! the concrete [`RejectReason`] is for logs and tests.

use std::collections::BTreeSet;
use std::fmt;

use votechain_types::{Role, TaggedAddress, Transaction};

use crate::registry::NodeRegistry;

/// The only text a rejected caller gets back.
pub const REJECTION_MESSAGE: &str = "Error: invalid transaction. Must be from civilian to government node. Must be exactly 1 token. Name must be on ballot. Vote will not be sent";

/// Amount carried by every vote and faucet grant.
pub const VOTE_AMOUNT: i64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Sender or recipient is not a parseable tagged address.
    MalformedAddress,
    /// Not civilian to government.
    WrongDirection,
    InvalidAmount,
    NotOnBallot,
    UnregisteredSender,
    UnregisteredRecipient,
    /// The sender already appears in the audit log.
    AlreadyVoted,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedAddress => "malformed address",
            Self::WrongDirection => "not civilian to government",
            Self::InvalidAmount => "amount is not exactly one token",
            Self::NotOnBallot => "name not on ballot",
            Self::UnregisteredSender => "sender not registered",
            Self::UnregisteredRecipient => "recipient not registered",
            Self::AlreadyVoted => "sender already voted",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of submitting a transaction to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// Accepted into the pending buffer. `block_index` is advisory: the
    /// transaction is committed by the next forged block regardless.
    Accepted { block_index: u64 },
    Rejected(RejectReason),
}

impl AdmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The caller-facing text. Rejections never say which rule failed.
    pub fn message(&self) -> String {
        match self {
            Self::Accepted { block_index } => format!("Vote will be added to block {block_index}"),
            Self::Rejected(_) => REJECTION_MESSAGE.to_string(),
        }
    }
}

/// Read-only view of the ledger state a vote is checked against.
pub(crate) struct AdmissionContext<'a> {
    pub nodes: &'a NodeRegistry,
    pub ballot: &'a BTreeSet<String>,
    pub audit_log: &'a [Transaction],
}

impl AdmissionContext<'_> {
    /// Apply every vote rule. The first failing rule is reported.
    pub fn check_vote(
        &self,
        sender: &TaggedAddress,
        recipient: &TaggedAddress,
        amount: i64,
        name: &str,
    ) -> Result<(), RejectReason> {
        if sender.role() != Role::Civilian || recipient.role() != Role::Government {
            return Err(RejectReason::WrongDirection);
        }
        if amount != VOTE_AMOUNT {
            return Err(RejectReason::InvalidAmount);
        }
        if !self.ballot.contains(name) {
            return Err(RejectReason::NotOnBallot);
        }
        if !self.nodes.contains(sender) {
            return Err(RejectReason::UnregisteredSender);
        }
        if !self.nodes.contains(recipient) {
            return Err(RejectReason::UnregisteredRecipient);
        }
        if self.audit_log.iter().any(|tx| &tx.sender == sender) {
            return Err(RejectReason::AlreadyVoted);
        }
        Ok(())
    }

    /// Rules for a faucet grant: the recipient must be a registered
    /// civilian or government node.
    pub fn check_faucet(&self, recipient: &TaggedAddress) -> Result<(), RejectReason> {
        if recipient.is_system() {
            return Err(RejectReason::WrongDirection);
        }
        if !self.nodes.contains(recipient) {
            return Err(RejectReason::UnregisteredRecipient);
        }
        Ok(())
    }
}
