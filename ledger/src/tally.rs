//! Vote tabulation.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use votechain_types::Transaction;

/// Per-candidate vote counts, in ballot order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tally {
    counts: Vec<(String, u64)>,
}

impl Tally {
    /// Count audit-log entries per ballot name, ignoring faucet grants and
    /// names that are not on the ballot.
    pub fn count<'a>(
        ballot: &BTreeSet<String>,
        audit_log: impl IntoIterator<Item = &'a Transaction>,
    ) -> Self {
        let mut counts: Vec<(String, u64)> = ballot.iter().map(|n| (n.clone(), 0)).collect();
        for tx in audit_log {
            if tx.is_faucet() {
                continue;
            }
            if let Some(entry) = counts.iter_mut().find(|(name, _)| *name == tx.name) {
                entry.1 += 1;
            }
        }
        Self { counts }
    }

    pub fn votes_for(&self, name: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, n)| (name.as_str(), *n))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// `"<name>: <count> vote(s). "` for every candidate.
impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, n) in &self.counts {
            write!(f, "{name}: {n} vote(s). ")?;
        }
        Ok(())
    }
}
