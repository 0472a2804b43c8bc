//! Address anonymization.

use votechain_types::TaggedAddress;

use crate::hash::sha256_hex;

/// Replace the locator with its SHA-256 hex digest, keeping the role tag.
pub fn anonymize(address: &TaggedAddress) -> TaggedAddress {
    TaggedAddress::new(address.role(), sha256_hex(address.body().as_bytes()))
}
