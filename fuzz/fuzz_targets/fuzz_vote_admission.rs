#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use votechain_ledger::Ledger;

#[derive(Debug, Arbitrary)]
struct Vote {
    sender: String,
    recipient: String,
    amount: i64,
    name: String,
}

fuzz_target!(|votes: Vec<Vote>| {
    let mut ledger = Ledger::new();
    ledger.add_candidate("Alice");
    let _ = ledger.enroll_node("voter:1", false);
    let _ = ledger.enroll_node("office:1", true);

    let mut accepted_senders = std::collections::HashSet::new();
    for vote in votes.iter().take(64) {
        let outcome = ledger.submit_vote(&vote.sender, &vote.recipient, vote.amount, &vote.name);
        if outcome.is_accepted() {
            // Only the registered civilian may vote, and only once.
            assert_eq!(vote.sender, "cvoter:1");
            assert!(accepted_senders.insert(vote.sender.clone()));
        }
    }
    assert!(ledger.tabulate().total() <= 1);
});
