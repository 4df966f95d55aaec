use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_proto::cosmos::base::v1beta1::Coin;
use icq_proto::neutron::interchainqueries::{KvKey, RegisteredQuery as RawRegisteredQuery};
use serde::{Deserialize, Serialize};

use crate::applications::interchainqueries::error::Error;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::prelude::*;
use crate::signer::Signer;
use crate::Height;

/// Type of a registered query, which decides the shape of the results it accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum QueryType {
    /// Values of fixed keys in the remote chain's stores.
    Kv,
    /// Remote transactions matching a filter.
    Tx,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kv => "kv",
            Self::Tx => "tx",
        }
    }

    pub fn is_kv(&self) -> bool {
        matches!(self, Self::Kv)
    }

    pub fn is_tx(&self) -> bool {
        matches!(self, Self::Tx)
    }
}

impl Display for QueryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kv" => Ok(Self::Kv),
            "tx" => Ok(Self::Tx),
            _ => Err(Error::invalid_type(format!("unknown query type {}", s))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredQuery {
    pub id: u64,
    pub owner: Signer,
    pub query_type: QueryType,
    /// KV queries only: the (path, key) pairs to read, in result order.
    pub keys: Vec<KvKey>,
    /// TX queries only: the transaction search filter.
    pub transactions_filter: String,
    pub connection_id: ConnectionId,
    pub update_period: u64,
    pub last_submitted_result_local_height: u64,
    pub last_submitted_result_remote_height: Height,
    pub deposit: Vec<Coin>,
    pub submit_timeout: u64,
    pub registered_at_height: u64,
}

impl TryFrom<RawRegisteredQuery> for RegisteredQuery {
    type Error = Error;

    fn try_from(raw: RawRegisteredQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            owner: raw.owner.parse().map_err(Error::signer)?,
            query_type: raw.query_type.parse()?,
            keys: raw.keys,
            transactions_filter: raw.transactions_filter,
            connection_id: raw.connection_id.parse().map_err(|e| {
                Error::invalid_type(format!("invalid connection id {}: {}", raw.connection_id, e))
            })?,
            update_period: raw.update_period,
            last_submitted_result_local_height: raw.last_submitted_result_local_height,
            last_submitted_result_remote_height: raw
                .last_submitted_result_remote_height
                .map(Height::from)
                .unwrap_or_default(),
            deposit: raw.deposit,
            submit_timeout: raw.submit_timeout,
            registered_at_height: raw.registered_at_height,
        })
    }
}

impl From<RegisteredQuery> for RawRegisteredQuery {
    fn from(query: RegisteredQuery) -> Self {
        RawRegisteredQuery {
            id: query.id,
            owner: query.owner.into(),
            query_type: query.query_type.as_str().to_string(),
            keys: query.keys,
            transactions_filter: query.transactions_filter,
            connection_id: query.connection_id.into(),
            update_period: query.update_period,
            last_submitted_result_local_height: query.last_submitted_result_local_height,
            last_submitted_result_remote_height: Some(
                query.last_submitted_result_remote_height.into(),
            ),
            deposit: query.deposit,
            submit_timeout: query.submit_timeout,
            registered_at_height: query.registered_at_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::interchainqueries::error::ErrorDetail;
    use crate::test_utils::get_dummy_raw_registered_query;
    use test_log::test;

    #[test]
    fn query_type_strings() {
        assert_eq!("kv".parse::<QueryType>().unwrap(), QueryType::Kv);
        assert_eq!(QueryType::Tx.to_string(), "tx");

        let err = "KV".parse::<QueryType>().unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidType(_)));
    }

    #[test]
    fn raw_query_conversion() {
        let raw = get_dummy_raw_registered_query(1, QueryType::Kv);
        let query = RegisteredQuery::try_from(raw.clone()).unwrap();

        assert!(query.query_type.is_kv());
        assert!(query.last_submitted_result_remote_height.is_zero());
        assert_eq!(RawRegisteredQuery::from(query).keys, raw.keys);
    }

    #[test]
    fn owner_must_be_an_address() {
        let mut raw = get_dummy_raw_registered_query(1, QueryType::Tx);
        raw.owner = "not-an-address".to_string();

        let err = RegisteredQuery::try_from(raw).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::Signer(_)));
    }
}
