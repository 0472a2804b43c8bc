//! The chain store and everything that mutates it.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, info};
use votechain_crypto::{anonymize, hash_block};
use votechain_types::{
    Block, BlockHash, ChainSnapshot, Role, TaggedAddress, Timestamp, Transaction,
};

use crate::admission::{AdmissionContext, AdmissionOutcome, RejectReason, VOTE_AMOUNT};
use crate::error::LedgerError;
use crate::genesis::genesis_block;
use crate::registry::NodeRegistry;
use crate::tally::Tally;
use crate::validator::validate_chain;

/// Largest random offset added to the tip index in an acceptance message.
const MAX_ADVISORY_OFFSET: u64 = 3;

/// One node's view of the vote chain.
///
/// `pending` holds anonymized transactions not yet committed to a block.
/// `audit_log` holds every admitted transaction in its raw form and is only
/// ever appended to; it drives tabulation and the one-vote rule and is never
/// published.
#[derive(Clone, Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    audit_log: Vec<Transaction>,
    ballot: BTreeSet<String>,
    nodes: NodeRegistry,
}

impl Ledger {
    /// A fresh ledger holding only a genesis block stamped now.
    pub fn new() -> Self {
        Self::with_genesis(Timestamp::now())
    }

    pub fn with_genesis(timestamp: Timestamp) -> Self {
        Self {
            chain: vec![genesis_block(timestamp)],
            pending: Vec::new(),
            audit_log: Vec::new(),
            ballot: BTreeSet::new(),
            nodes: NodeRegistry::new(),
        }
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false; a ledger holds at least its genesis block.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger chain always holds the genesis block")
    }

    /// `(proof, digest)` of the tip: the inputs for mining the next block.
    pub fn tip(&self) -> (u64, BlockHash) {
        let last = self.last_block();
        (last.proof, hash_block(last))
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot::from_chain(self.chain.clone())
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn audit_log(&self) -> &[Transaction] {
        &self.audit_log
    }

    pub fn ballot(&self) -> &BTreeSet<String> {
        &self.ballot
    }

    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    /// Append a block holding every pending transaction.
    ///
    /// `previous_hash` defaults to the digest of the current tip. The new
    /// block's timestamp never precedes the tip's.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<BlockHash>) -> &Block {
        let last = self.last_block();
        let previous_hash = previous_hash.unwrap_or_else(|| hash_block(last));
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: Timestamp::now().at_least(last.timestamp),
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        info!(
            index = block.index,
            proof = block.proof,
            transactions = block.transactions.len(),
            "block forged"
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Record `address` as a government or civilian node.
    pub fn register_node(
        &mut self,
        address: &str,
        government: bool,
    ) -> Result<TaggedAddress, LedgerError> {
        self.record_node(address, government).map(|(tagged, _)| tagged)
    }

    /// Register a node and hand it its voting token.
    ///
    /// A node only ever receives one token: registering a known locator
    /// again grants nothing.
    pub fn enroll_node(
        &mut self,
        address: &str,
        government: bool,
    ) -> Result<TaggedAddress, LedgerError> {
        let (tagged, is_new) = self.record_node(address, government)?;
        if is_new {
            let grant = self.grant_faucet_token(&tagged);
            debug_assert!(grant.is_accepted());
        }
        Ok(tagged)
    }

    /// Put `name` on the ballot. Returns false if it was already there.
    pub fn add_candidate(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let added = self.ballot.insert(name.clone());
        if added {
            info!(candidate = %name, "candidate added to ballot");
        }
        added
    }

    /// Admit a vote given in wire form (tagged address strings).
    pub fn submit_vote(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: i64,
        name: &str,
    ) -> AdmissionOutcome {
        self.submit_vote_with(&mut rand::thread_rng(), sender, recipient, amount, name)
    }

    /// [`Ledger::submit_vote`] with a caller-supplied source for the
    /// advisory block offset.
    pub fn submit_vote_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        sender: &str,
        recipient: &str,
        amount: i64,
        name: &str,
    ) -> AdmissionOutcome {
        let parsed = sender
            .parse::<TaggedAddress>()
            .and_then(|s| recipient.parse::<TaggedAddress>().map(|r| (s, r)));
        let (sender, recipient) = match parsed {
            Ok(pair) => pair,
            Err(_) => return self.reject(RejectReason::MalformedAddress),
        };

        let ctx = AdmissionContext {
            nodes: &self.nodes,
            ballot: &self.ballot,
            audit_log: &self.audit_log,
        };
        if let Err(reason) = ctx.check_vote(&sender, &recipient, amount, name) {
            return self.reject(reason);
        }

        let block_index = self
            .last_block()
            .index
            .saturating_add(rng.gen_range(1..=MAX_ADVISORY_OFFSET));
        self.admit(Transaction::new(sender, recipient, amount, name));
        info!(advisory_block = block_index, "vote accepted");
        AdmissionOutcome::Accepted { block_index }
    }

    /// Issue one token from the system faucet to a registered node.
    ///
    /// Faucet grants land in the pending buffer and the audit log like votes
    /// but are never tabulated and never count as a vote by the recipient.
    pub fn grant_faucet_token(&mut self, recipient: &TaggedAddress) -> AdmissionOutcome {
        let ctx = AdmissionContext {
            nodes: &self.nodes,
            ballot: &self.ballot,
            audit_log: &self.audit_log,
        };
        if let Err(reason) = ctx.check_faucet(recipient) {
            return self.reject(reason);
        }

        let block_index = self.last_block().index.saturating_add(1);
        self.admit(Transaction::new(
            TaggedAddress::system(),
            recipient.clone(),
            VOTE_AMOUNT,
            "",
        ));
        debug!(role = %recipient.role(), "faucet token granted");
        AdmissionOutcome::Accepted { block_index }
    }

    /// Count committed and pending votes per ballot candidate.
    pub fn tabulate(&self) -> Tally {
        Tally::count(&self.ballot, &self.audit_log)
    }

    /// Adopt `candidate` if it is valid and strictly longer than our chain.
    ///
    /// Every block's index must also equal its 1-based position. The pending
    /// buffer and audit log are kept.
    pub fn replace_chain(&mut self, candidate: Vec<Block>) -> Result<(), LedgerError> {
        if candidate.len() <= self.chain.len() {
            return Err(LedgerError::ChainNotLonger {
                local: self.chain.len(),
                candidate: candidate.len(),
            });
        }
        validate_chain(&candidate)?;
        validate_positions(&candidate)?;
        info!(
            old_length = self.chain.len(),
            new_length = candidate.len(),
            "chain replaced"
        );
        self.chain = candidate;
        Ok(())
    }

    fn record_node(
        &mut self,
        address: &str,
        government: bool,
    ) -> Result<(TaggedAddress, bool), LedgerError> {
        let (tagged, is_new) = self.nodes.register(address, Role::for_node(government))?;
        if is_new {
            info!(role = %tagged.role(), locator = tagged.body(), "node registered");
        }
        Ok((tagged, is_new))
    }

    fn admit(&mut self, raw: Transaction) {
        let sender = if raw.sender.is_system() {
            raw.sender.clone()
        } else {
            anonymize(&raw.sender)
        };
        let public = Transaction::new(sender, anonymize(&raw.recipient), raw.amount, raw.name.clone());
        self.pending.push(public);
        self.audit_log.push(raw);
    }

    fn reject(&self, reason: RejectReason) -> AdmissionOutcome {
        debug!(%reason, "transaction rejected");
        AdmissionOutcome::Rejected(reason)
    }
}

/// Check that every block's index equals its 1-based position in `chain`.
pub fn validate_positions(chain: &[Block]) -> Result<(), LedgerError> {
    for (position, block) in (1u64..).zip(chain) {
        if block.index != position {
            return Err(LedgerError::IndexMismatch {
                position,
                index: block.index,
            });
        }
    }
    Ok(())
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
