#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // A peer's /chain body is untrusted. Decoding and validating it must
    // never panic, whatever the bytes.
    if let Ok(snapshot) = serde_json::from_slice::<votechain_types::ChainSnapshot>(data) {
        let _ = snapshot.is_consistent();
        let _ = votechain_ledger::validate_chain(&snapshot.chain);
        for block in &snapshot.chain {
            let _ = votechain_crypto::hash_block(block);
        }
    }

    let _ = serde_json::from_slice::<votechain_types::TaggedAddress>(data);
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = votechain_types::parse_locator(text);
    }
});
