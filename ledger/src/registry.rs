//! Registry of known nodes and their roles.

use std::collections::BTreeMap;

use tracing::warn;
use votechain_types::{parse_locator, AddressError, Role, TaggedAddress};

/// Known peers keyed by network locator.
///
/// Iteration is in locator order, which is also the order consensus polls
/// peers in. A locator keeps the role it was first registered with.
#[derive(Clone, Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, Role>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `address` (URL or bare `host:port`) under `role`.
    ///
    /// Returns the tagged address as stored and whether the locator was new.
    /// Re-registering a known locator with a different role leaves the
    /// original role in place.
    pub fn register(
        &mut self,
        address: &str,
        role: Role,
    ) -> Result<(TaggedAddress, bool), AddressError> {
        let locator = parse_locator(address)?;
        let is_new = !self.nodes.contains_key(&locator);
        let stored = *self.nodes.entry(locator.clone()).or_insert(role);
        if stored != role {
            warn!(
                locator = %locator,
                registered = %stored,
                requested = %role,
                "node already registered with a different role; keeping original"
            );
        }
        Ok((TaggedAddress::new(stored, locator), is_new))
    }

    /// Whether `address` names a registered node with the same role.
    pub fn contains(&self, address: &TaggedAddress) -> bool {
        self.nodes.get(address.body()) == Some(&address.role())
    }

    pub fn role_of(&self, locator: &str) -> Option<Role> {
        self.nodes.get(locator).copied()
    }

    /// Raw locators in polling order.
    pub fn locators(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Tagged addresses in polling order.
    pub fn tagged(&self) -> impl Iterator<Item = TaggedAddress> + '_ {
        self.nodes
            .iter()
            .map(|(locator, role)| TaggedAddress::new(*role, locator.clone()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
