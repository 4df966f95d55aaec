use icq_proto::neutron::interchainqueries::{
    MsgSubmitQueryResult as RawMsgSubmitQueryResult, QueryResult,
};

use crate::applications::interchainqueries::error::Error;
use crate::config::Params;
use crate::keys::ROUTER_KEY;
use crate::prelude::*;
use crate::signer::Signer;

pub const TYPE_URL: &str = "/neutron.interchainqueries.MsgSubmitQueryResult";

/// A relayer's submission of a KV or TX result for a registered query.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgSubmitQueryResult {
    pub query_id: u64,
    pub sender: Signer,
    /// Carried for relayers' bookkeeping. Verification resolves the client through the query's
    /// connection instead.
    pub client_id: String,
    pub result: QueryResult,
}

impl MsgSubmitQueryResult {
    pub fn route(&self) -> String {
        ROUTER_KEY.to_string()
    }

    pub fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }

    /// Stateless checks of a raw submission, in the order the host chain runs them: the
    /// result first, then the query id, then the sender.
    pub fn validate_basic(raw: &RawMsgSubmitQueryResult, params: &Params) -> Result<(), Error> {
        let result = match &raw.result {
            Some(result) if !is_empty_result(result) => result,
            _ => return Err(Error::empty_result()),
        };

        if raw.query_id == 0 {
            return Err(Error::invalid_query_id(raw.query_id));
        }

        raw.sender.parse::<Signer>().map_err(Error::signer)?;

        if result.kv_results.len() as u64 > params.max_kv_query_keys_count {
            return Err(Error::too_many_keys(
                params.max_kv_query_keys_count,
                result.kv_results.len(),
            ));
        }

        Ok(())
    }
}

/// A result carrying neither KV values nor a block.
fn is_empty_result(result: &QueryResult) -> bool {
    result.kv_results.is_empty() && result.block.is_none()
}

impl TryFrom<RawMsgSubmitQueryResult> for MsgSubmitQueryResult {
    type Error = Error;

    fn try_from(raw: RawMsgSubmitQueryResult) -> Result<Self, Self::Error> {
        Ok(Self {
            query_id: raw.query_id,
            sender: raw.sender.parse().map_err(Error::signer)?,
            client_id: raw.client_id,
            result: raw.result.ok_or_else(Error::empty_result)?,
        })
    }
}

impl From<MsgSubmitQueryResult> for RawMsgSubmitQueryResult {
    fn from(msg: MsgSubmitQueryResult) -> Self {
        RawMsgSubmitQueryResult {
            query_id: msg.query_id,
            sender: msg.sender.into(),
            client_id: msg.client_id,
            result: Some(msg.result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::interchainqueries::error::ErrorDetail;
    use crate::applications::interchainqueries::result::{Block, StorageValue};
    use crate::test_utils::get_dummy_bech32_account;
    use test_log::test;

    fn kv_result(values: usize) -> QueryResult {
        QueryResult {
            kv_results: (0..values)
                .map(|i| StorageValue {
                    storage_prefix: "bank".to_string(),
                    key: vec![i as u8],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn raw_msg(result: Option<QueryResult>) -> RawMsgSubmitQueryResult {
        RawMsgSubmitQueryResult {
            query_id: 1,
            sender: get_dummy_bech32_account(1),
            client_id: "07-tendermint-0".to_string(),
            result,
        }
    }

    #[test]
    fn validate_basic() {
        struct Test {
            name: String,
            raw: RawMsgSubmitQueryResult,
            want: Option<fn(&ErrorDetail) -> bool>,
        }

        let params = Params::default();

        let tests: Vec<Test> = vec![
            Test {
                name: "Good KV result".to_string(),
                raw: raw_msg(Some(kv_result(2))),
                want: None,
            },
            Test {
                name: "Good TX result".to_string(),
                raw: raw_msg(Some(QueryResult {
                    block: Some(Block::default()),
                    ..Default::default()
                })),
                want: None,
            },
            Test {
                name: "Missing result".to_string(),
                raw: raw_msg(None),
                want: Some(|e| matches!(e, ErrorDetail::EmptyResult(_))),
            },
            Test {
                name: "Empty result".to_string(),
                raw: raw_msg(Some(QueryResult::default())),
                want: Some(|e| matches!(e, ErrorDetail::EmptyResult(_))),
            },
            Test {
                name: "Zero query id".to_string(),
                raw: RawMsgSubmitQueryResult {
                    query_id: 0,
                    ..raw_msg(Some(kv_result(1)))
                },
                want: Some(|e| matches!(e, ErrorDetail::InvalidQueryId(_))),
            },
            Test {
                name: "Result checked before query id".to_string(),
                raw: RawMsgSubmitQueryResult {
                    query_id: 0,
                    ..raw_msg(None)
                },
                want: Some(|e| matches!(e, ErrorDetail::EmptyResult(_))),
            },
            Test {
                name: "Empty sender".to_string(),
                raw: RawMsgSubmitQueryResult {
                    sender: String::new(),
                    ..raw_msg(Some(kv_result(1)))
                },
                want: Some(|e| matches!(e, ErrorDetail::Signer(_))),
            },
            Test {
                name: "Sender is not bech32".to_string(),
                raw: RawMsgSubmitQueryResult {
                    sender: "relayer".to_string(),
                    ..raw_msg(Some(kv_result(1)))
                },
                want: Some(|e| matches!(e, ErrorDetail::Signer(_))),
            },
            Test {
                name: "Client id is not checked".to_string(),
                raw: RawMsgSubmitQueryResult {
                    client_id: String::new(),
                    ..raw_msg(Some(kv_result(1)))
                },
                want: None,
            },
            Test {
                name: "Too many KV results".to_string(),
                raw: raw_msg(Some(kv_result(params.max_kv_query_keys_count as usize + 1))),
                want: Some(|e| matches!(e, ErrorDetail::TooManyKeys(_))),
            },
        ];

        for test in tests {
            let res = MsgSubmitQueryResult::validate_basic(&test.raw, &params);
            match (res, test.want) {
                (Ok(()), None) => {}
                (Err(e), Some(check)) => {
                    assert!(check(e.detail()), "{}: unexpected error {}", test.name, e)
                }
                (res, _) => panic!("{}: unexpected outcome {:?}", test.name, res),
            }
        }
    }

    #[test]
    fn raw_conversion() {
        let raw = raw_msg(Some(kv_result(1)));
        let msg = MsgSubmitQueryResult::try_from(raw.clone()).unwrap();

        assert_eq!(msg.route(), "interchainqueries");
        assert_eq!(msg.type_url(), TYPE_URL);
        assert_eq!(RawMsgSubmitQueryResult::from(msg), raw);
    }
}
