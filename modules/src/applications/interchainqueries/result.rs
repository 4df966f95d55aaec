//! Query results submitted by relayers. The wire types are used as-is; this module only adds
//! the projections the engine persists.

pub use icq_proto::neutron::interchainqueries::{Block, QueryResult, StorageValue, TxValue};
pub use tendermint_proto::v0_38::abci::ExecTxResult;

use crate::prelude::*;
use crate::Height;

/// Remote height the result was read at.
pub fn result_height(result: &QueryResult) -> Height {
    Height::new(result.revision, result.height)
}

/// Copy of a KV result fit for storage: keys and values survive, proofs and blocks do not.
pub fn strip_proofs(result: &QueryResult) -> QueryResult {
    QueryResult {
        kv_results: result
            .kv_results
            .iter()
            .map(|value| StorageValue {
                storage_prefix: value.storage_prefix.clone(),
                key: value.key.clone(),
                value: value.value.clone(),
                proof: None,
            })
            .collect(),
        block: None,
        height: result.height,
        revision: result.revision,
        allow_kv_callbacks: false,
    }
}
