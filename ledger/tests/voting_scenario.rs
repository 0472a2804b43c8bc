//! End-to-end ballot on a single ledger.

use votechain_ledger::{AdmissionOutcome, Ledger, RejectReason, REJECTION_MESSAGE};
use votechain_work::{CancelToken, ProofOfWork};

fn mine_one(ledger: &mut Ledger) {
    let proof = ProofOfWork::new()
        .mine(ledger.last_block(), &CancelToken::new())
        .unwrap();
    ledger.new_block(proof, None);
}

#[test]
fn one_voter_one_vote() {
    let mut ledger = Ledger::new();
    let c1 = ledger.enroll_node("http://10.0.0.1:5000", false).unwrap();
    let g1 = ledger.enroll_node("10.0.0.2:5000", true).unwrap();
    assert_eq!(ledger.audit_log().iter().filter(|tx| tx.is_faucet()).count(), 2);
    ledger.add_candidate("Alice");

    let first = ledger.submit_vote(&c1.to_string(), &g1.to_string(), 1, "Alice");
    match first {
        AdmissionOutcome::Accepted { block_index } => {
            assert!(block_index > ledger.len() as u64);
            assert_eq!(first.message(), format!("Vote will be added to block {block_index}"));
        }
        other => panic!("first vote rejected: {other:?}"),
    }

    let second = ledger.submit_vote(&c1.to_string(), &g1.to_string(), 1, "Alice");
    assert_eq!(second, AdmissionOutcome::Rejected(RejectReason::AlreadyVoted));
    assert_eq!(second.message(), REJECTION_MESSAGE);

    for _ in 0..3 {
        mine_one(&mut ledger);
    }
    assert_eq!(ledger.tabulate().to_string(), "Alice: 1 vote(s). ");

    let committed: Vec<_> = ledger
        .chain()
        .iter()
        .flat_map(|block| block.transactions.iter())
        .collect();
    assert_eq!(committed.len(), 3);
    assert!(committed
        .iter()
        .all(|tx| !tx.sender.to_string().contains("10.0.0") && !tx.recipient.to_string().contains("10.0.0")));
}

#[test]
fn rejections_combine() {
    let mut ledger = Ledger::new();
    ledger.enroll_node("voter:1", false).unwrap();
    ledger.enroll_node("office:1", true).unwrap();
    ledger.add_candidate("Alice");

    let cases = [
        ("goffice:1", "cvoter:1", 1, "Alice"),
        ("cvoter:1", "goffice:1", 2, "Bob"),
        ("cstranger:1", "gstranger:2", 1, "Alice"),
        ("gvoter:1", "goffice:1", 0, "Alice"),
        ("0", "goffice:1", 1, ""),
    ];
    for (sender, recipient, amount, name) in cases {
        let outcome = ledger.submit_vote(sender, recipient, amount, name);
        assert!(!outcome.is_accepted(), "{sender} -> {recipient} accepted");
        assert_eq!(outcome.message(), REJECTION_MESSAGE);
    }
    assert_eq!(ledger.pending().len(), 2);
}
