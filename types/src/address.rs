//! Role-tagged addresses and node locator parsing.
//!
//! On the wire an address is a flat string: one role-tag character followed by
//! either a raw peer locator (before admission) or the SHA-256 hex digest of that
//! locator (after admission). In memory it is a [`TaggedAddress`] so role checks
//! never have to inspect characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AddressError;

/// The role a participant plays in the ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A voter. Tag `c`.
    Civilian,
    /// A vote recipient. Tag `g`.
    Government,
    /// The faucet that hands out voting tokens. Tag `0`.
    System,
}

impl Role {
    /// The single-character tag used in the flat string form.
    pub const fn tag(self) -> char {
        match self {
            Self::Civilian => 'c',
            Self::Government => 'g',
            Self::System => '0',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'c' => Some(Self::Civilian),
            'g' => Some(Self::Government),
            '0' => Some(Self::System),
            _ => None,
        }
    }

    /// Role of a registered node.
    pub fn for_node(government: bool) -> Self {
        if government {
            Self::Government
        } else {
            Self::Civilian
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Civilian => "civilian",
            Self::Government => "government",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An address carrying its role explicitly.
///
/// `body` is the raw locator for unadmitted addresses and a hex digest for
/// anonymized ones. The system address has an empty body.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaggedAddress {
    role: Role,
    body: String,
}

impl TaggedAddress {
    pub fn new(role: Role, body: impl Into<String>) -> Self {
        Self {
            role,
            body: body.into(),
        }
    }

    pub fn civilian(locator: impl Into<String>) -> Self {
        Self::new(Role::Civilian, locator)
    }

    pub fn government(locator: impl Into<String>) -> Self {
        Self::new(Role::Government, locator)
    }

    /// The faucet address, `"0"`.
    pub fn system() -> Self {
        Self::new(Role::System, String::new())
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Everything after the tag character.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}

impl fmt::Display for TaggedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.tag(), self.body)
    }
}

impl FromStr for TaggedAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let tag = chars.next().ok_or(AddressError::Empty)?;
        let role = Role::from_tag(tag).ok_or_else(|| AddressError::UnknownRole {
            tag,
            address: s.to_string(),
        })?;
        let body = chars.as_str();
        if body.is_empty() && role != Role::System {
            return Err(AddressError::EmptyLocator(s.to_string()));
        }
        Ok(Self::new(role, body))
    }
}

impl TryFrom<String> for TaggedAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TaggedAddress> for String {
    fn from(address: TaggedAddress) -> Self {
        address.to_string()
    }
}

/// Extract the network location from a node address.
///
/// Accepts full URLs (`http://192.168.0.5:5000/`) as well as bare
/// `host:port` forms (`192.168.0.5:5000`). Userinfo is dropped from URLs.
pub fn parse_locator(address: &str) -> Result<String, AddressError> {
    let trimmed = address.trim();
    let location = if let Some(rest) = trimmed.strip_prefix("//") {
        authority_of(rest)
    } else {
        match trimmed.split_once("://") {
            Some((scheme, rest)) => {
                let scheme_ok = !scheme.is_empty()
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
                if !scheme_ok {
                    return Err(AddressError::InvalidUrl(address.to_string()));
                }
                authority_of(rest)
            }
            None => trimmed.trim_end_matches('/'),
        }
    };

    if location.is_empty() {
        return Err(AddressError::EmptyLocator(address.to_string()));
    }
    if location.chars().any(char::is_whitespace) {
        return Err(AddressError::InvalidUrl(address.to_string()));
    }
    Ok(location.to_string())
}

/// `host[:port]` of a URL with its scheme and `//` removed, minus userinfo.
fn authority_of(rest: &str) -> &str {
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_role_tag() {
        let c: TaggedAddress = "c127.0.0.1:5001".parse().unwrap();
        assert_eq!(c.role(), Role::Civilian);
        assert_eq!(c.body(), "127.0.0.1:5001");

        let g: TaggedAddress = "g127.0.0.1:5002".parse().unwrap();
        assert_eq!(g.role(), Role::Government);

        let s: TaggedAddress = "0".parse().unwrap();
        assert!(s.is_system());
        assert_eq!(s, TaggedAddress::system());
    }

    #[test]
    fn rejects_unknown_tag_and_empty() {
        assert!(matches!(
            "x127.0.0.1".parse::<TaggedAddress>(),
            Err(AddressError::UnknownRole { tag: 'x', .. })
        ));
        assert_eq!("".parse::<TaggedAddress>(), Err(AddressError::Empty));
        assert!(matches!(
            "c".parse::<TaggedAddress>(),
            Err(AddressError::EmptyLocator(_))
        ));
    }

    #[test]
    fn display_restores_flat_form() {
        let addr = TaggedAddress::government("10.0.0.1:5000");
        assert_eq!(addr.to_string(), "g10.0.0.1:5000");
        assert_eq!(TaggedAddress::system().to_string(), "0");
    }

    #[test]
    fn serializes_as_flat_string() {
        let addr = TaggedAddress::civilian("host:1");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"chost:1\"");
        let back: TaggedAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<TaggedAddress>("\"zzz\"").is_err());
    }

    #[test]
    fn locator_from_full_url() {
        assert_eq!(
            parse_locator("http://192.168.0.5:5000").unwrap(),
            "192.168.0.5:5000"
        );
        assert_eq!(
            parse_locator("https://user:pw@node.example:8443/chain?x=1").unwrap(),
            "node.example:8443"
        );
    }

    #[test]
    fn locator_from_bare_host_port() {
        assert_eq!(parse_locator("192.168.0.5:5000").unwrap(), "192.168.0.5:5000");
        assert_eq!(parse_locator(" localhost:5001/ ").unwrap(), "localhost:5001");
    }

    #[test]
    fn locator_from_scheme_relative_url() {
        assert_eq!(parse_locator("//host:5000").unwrap(), "host:5000");
        assert_eq!(parse_locator("//admin@host:5000/chain").unwrap(), "host:5000");
        assert!(matches!(parse_locator("//"), Err(AddressError::EmptyLocator(_))));
    }

    #[test]
    fn locator_rejects_empty_location() {
        assert!(matches!(parse_locator(""), Err(AddressError::EmptyLocator(_))));
        assert!(matches!(
            parse_locator("http://"),
            Err(AddressError::EmptyLocator(_))
        ));
        assert!(matches!(
            parse_locator("http:///path"),
            Err(AddressError::EmptyLocator(_))
        ));
        assert!(matches!(
            parse_locator("://host"),
            Err(AddressError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_locator("two words"),
            Err(AddressError::InvalidUrl(_))
        ));
    }
}
