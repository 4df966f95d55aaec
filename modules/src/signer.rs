use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use flex_error::{define_error, DisplayOnly};
use serde::{Deserialize, Serialize};
use subtle_encoding::bech32;

use crate::prelude::*;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    SignerError {
        EmptySigner
            | _ | { "signer cannot be empty" },

        InvalidBech32
            { address: String }
            [ DisplayOnly<subtle_encoding::Error> ]
            | e | { format_args!("failed to parse bech32 address: {}", e.address) },

        EmptyAddressBytes
            { address: String }
            | e | { format_args!("bech32 address {} carries no account bytes", e.address) },
    }
}

/// A bech32 account address, as used for relayers submitting results and for contracts owning
/// registered queries.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signer(String);

impl Signer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable part of the address, e.g. `neutron`.
    pub fn hrp(&self) -> String {
        self.decode().map(|(hrp, _)| hrp).unwrap_or_default()
    }

    /// Raw account bytes behind the address.
    pub fn account_bytes(&self) -> Vec<u8> {
        self.decode().map(|(_, bytes)| bytes).unwrap_or_default()
    }

    fn decode(&self) -> Result<(String, Vec<u8>), SignerError> {
        decode_address(&self.0)
    }
}

fn decode_address(s: &str) -> Result<(String, Vec<u8>), SignerError> {
    let (hrp, bytes) =
        bech32::decode(s).map_err(|e| SignerError::invalid_bech32(s.to_string(), e))?;
    if bytes.is_empty() {
        return Err(SignerError::empty_address_bytes(s.to_string()));
    }
    Ok((hrp, bytes))
}

impl Display for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Signer {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SignerError::empty_signer());
        }
        decode_address(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Signer {
    type Error = SignerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Signer> for String {
    fn from(signer: Signer) -> Self {
        signer.0
    }
}
