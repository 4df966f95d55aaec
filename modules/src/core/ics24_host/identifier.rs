use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::validate::{validate_client_identifier, validate_connection_identifier};
use crate::prelude::*;

/// Client type prefix of the only light client kind the engine verifies headers with.
pub const TENDERMINT_CLIENT_TYPE: &str = "07-tendermint";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Builds a new client identifier. Client identifiers are deterministically formed from two
    /// elements: a prefix derived from the client type `ctype`, and a monotonically increasing
    /// `counter`; these are separated by a dash "-".
    pub fn new(ctype: &str, counter: u64) -> Result<Self, ValidationError> {
        let id = format!("{}-{}", ctype, counter);
        Self::from_str(id.as_str())
    }

    /// Get this identifier as a borrowed `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get this identifier as a borrowed byte slice
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// This implementation provides a `to_string` method.
impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_client_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_client_identifier(&value).map(|_| Self(value))
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self(format!("{}-0", TENDERMINT_CLIENT_TYPE))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Builds a new connection identifier. Connection identifiers are deterministically formed from
    /// two elements: a prefix `prefix`, and a monotonically increasing `counter`; these are
    /// separated by a dash "-". The prefix is currently determined statically (see
    /// `ConnectionId::prefix()`) so this method accepts a single argument, the `counter`.
    pub fn new(counter: u64) -> Self {
        let id = format!("{}-{}", Self::prefix(), counter);
        Self(id)
    }

    /// Returns the static prefix to be used across all connection identifiers.
    pub fn prefix() -> &'static str {
        "connection"
    }

    /// Get this identifier as a borrowed `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// This implementation provides a `to_string` method.
impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConnectionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_connection_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_connection_identifier(&value).map(|_| Self(value))
    }
}

impl From<ConnectionId> for String {
    fn from(id: ConnectionId) -> Self {
        id.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Equality check against string literal (satisfies &ConnectionId == &str).
impl PartialEq<str> for ConnectionId {
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn client_id_from_counter() {
        let id = ClientId::new(TENDERMINT_CLIENT_TYPE, 7).unwrap();
        assert_eq!(id.as_str(), "07-tendermint-7");
        assert_eq!(ClientId::default().as_str(), "07-tendermint-0");
    }

    #[test]
    fn connection_id_from_counter() {
        let id = ConnectionId::new(3);
        assert_eq!(&id, "connection-3");
        assert_eq!(ConnectionId::from_str("connection-3").unwrap(), id);
    }

    #[test]
    fn connection_id_rejects_short_ids() {
        assert!(ConnectionId::from_str("conn-1").is_err());
        assert!(ConnectionId::try_from("connection/1".to_string()).is_err());
    }
}
