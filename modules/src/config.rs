//! Module parameters of the interchain queries module.
//!
//! Hosts normally keep these in chain state; under the `std` feature they can also be loaded
//! from (and written to) a TOML file, which is how test networks and tooling configure them.
//!
//! Result submission only reads `max_kv_query_keys_count`. The remaining parameters drive
//! query registration, deposits and removal, which the host implements; they are validated
//! here so every host sees the same rules.

use flex_error::define_error;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// One month, with a block time of 2.5s.
pub const DEFAULT_QUERY_SUBMIT_TIMEOUT: u64 = 1_036_800;
pub const DEFAULT_QUERY_DEPOSIT_DENOM: &str = "untrn";
pub const DEFAULT_QUERY_DEPOSIT_AMOUNT: u64 = 1_000_000;
pub const DEFAULT_TX_QUERY_REMOVAL_LIMIT: u64 = 10_000;
pub const DEFAULT_MAX_KV_QUERY_KEYS_COUNT: u64 = 32;
pub const DEFAULT_MAX_TRANSACTIONS_FILTERS: u64 = 32;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    Error {
        ZeroLimit
            { name: String }
            | e | { format_args!("parameter {} must be greater than zero", e.name) },

        InvalidDeposit
            { reason: String }
            | e | { format_args!("invalid query deposit: {}", e.reason) },
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Params {
    /// Number of blocks after which a query becomes removable by anyone.
    pub query_submit_timeout: u64,
    /// Maximum number of submitted-tx markers removed per block after a TX query is removed.
    pub tx_query_removal_limit: u64,
    /// Maximum number of keys a KV query (and therefore a KV result) may carry.
    pub max_kv_query_keys_count: u64,
    /// Maximum number of conditions in a TX query filter.
    pub max_transactions_filters: u64,
    /// Deposit a contract locks when registering a query.
    pub query_deposit: Vec<Coin>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            query_submit_timeout: DEFAULT_QUERY_SUBMIT_TIMEOUT,
            tx_query_removal_limit: DEFAULT_TX_QUERY_REMOVAL_LIMIT,
            max_kv_query_keys_count: DEFAULT_MAX_KV_QUERY_KEYS_COUNT,
            max_transactions_filters: DEFAULT_MAX_TRANSACTIONS_FILTERS,
            query_deposit: vec![Coin {
                denom: DEFAULT_QUERY_DEPOSIT_DENOM.to_string(),
                amount: DEFAULT_QUERY_DEPOSIT_AMOUNT,
            }],
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("query_submit_timeout", self.query_submit_timeout),
            ("tx_query_removal_limit", self.tx_query_removal_limit),
            ("max_kv_query_keys_count", self.max_kv_query_keys_count),
            ("max_transactions_filters", self.max_transactions_filters),
        ] {
            if value == 0 {
                return Err(Error::zero_limit(name.to_string()));
            }
        }

        let mut denoms: Vec<&str> = Vec::with_capacity(self.query_deposit.len());
        for coin in &self.query_deposit {
            if coin.denom.trim().is_empty() {
                return Err(Error::invalid_deposit("empty denom".to_string()));
            }
            if coin.amount == 0 {
                return Err(Error::invalid_deposit(format!(
                    "zero amount of {}",
                    coin.denom
                )));
            }
            if denoms.contains(&coin.denom.as_str()) {
                return Err(Error::invalid_deposit(format!(
                    "duplicate denom {}",
                    coin.denom
                )));
            }
            denoms.push(&coin.denom);
        }

        Ok(())
    }
}

#[cfg(feature = "std")]
pub mod file {
    use std::fs;
    use std::path::Path;

    use flex_error::{define_error, TraceError};

    use super::{Error as ParamsError, Params};
    use crate::prelude::*;

    define_error! {
        Error {
            Io
                [ TraceError<std::io::Error> ]
                | _ | { "config I/O error" },

            Decode
                [ TraceError<toml::de::Error> ]
                | _ | { "invalid configuration" },

            Encode
                [ TraceError<toml::ser::Error> ]
                | _ | { "invalid configuration" },

            Invalid
                [ ParamsError ]
                | _ | { "invalid module parameters" },
        }
    }

    /// Parses and validates `Params` from TOML. Missing fields take their default value.
    pub fn from_toml_str(contents: &str) -> Result<Params, Error> {
        let params = toml::from_str::<Params>(contents).map_err(Error::decode)?;
        params.validate().map_err(Error::invalid)?;
        Ok(params)
    }

    /// Attempt to load and parse the TOML config file as `Params`.
    pub fn load(path: impl AsRef<Path>) -> Result<Params, Error> {
        let contents = fs::read_to_string(path).map_err(Error::io)?;
        from_toml_str(&contents)
    }

    /// Serialize the given `Params` as TOML to the given config file.
    pub fn store(params: &Params, path: impl AsRef<Path>) -> Result<(), Error> {
        let contents = toml::to_string_pretty(params).map_err(Error::encode)?;
        fs::write(path, contents).map_err(Error::io)
    }
}
