#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u64, u64, String)| {
    // Validate an arbitrary (last_proof, proof, last_hash) triple.
    let (last_proof, proof, last_hash) = input;
    let hash = votechain_types::BlockHash::new(last_hash);

    // This must never panic regardless of input, and must agree with the
    // digest prefix test.
    let valid = votechain_work::valid_proof(last_proof, proof, &hash);
    let digest = votechain_work::proof_digest(last_proof, proof, &hash);
    assert_eq!(valid, digest.starts_with(votechain_work::DIFFICULTY_PREFIX));
});
