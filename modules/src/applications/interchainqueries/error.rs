use flex_error::{define_error, DisplayOnly};

use crate::applications::interchainqueries::context::CallbackError;
use crate::config::Error as ParamsError;
use crate::core::ics02_client::error as client_error;
use crate::core::ics03_connection::error as connection_error;
use crate::prelude::*;
use crate::signer::SignerError;
use crate::Height;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    Error {
        InvalidType
            { reason: String }
            | e | { format_args!("invalid type: {}", e.reason) },

        InvalidProof
            { reason: String }
            | e | { format_args!("merkle proof is invalid: {}", e.reason) },

        InvalidHeader
            { reason: String }
            | e | { format_args!("header is invalid: {}", e.reason) },

        InvalidHeight
            { reason: String }
            | e | { format_args!("result height is invalid: {}", e.reason) },

        ProtoMarshal
            { reason: String }
            | e | { format_args!("failed to marshal protobuf bytes: {}", e.reason) },

        ProtoUnmarshal
            { reason: String }
            | e | { format_args!("failed to unmarshal protobuf bytes: {}", e.reason) },

        Internal
            { reason: String }
            | e | { format_args!("internal error: {}", e.reason) },

        NoQueryResult
            { query_id: u64 }
            | e | { format_args!("no query result for query {}", e.query_id) },

        InvalidQueryId
            { query_id: u64 }
            | e | { format_args!("invalid query id {}", e.query_id) },

        EmptyResult
            | _ | { "query result can't be empty" },

        InvalidSubmittedResult
            { reason: String }
            | e | { format_args!("invalid query result: {}", e.reason) },

        InvalidStorageValue
            { index: usize }
            [ DisplayOnly<Error> ]
            | e | { format_args!("failed to check storage value {}", e.index) },

        TooManyKeys
            { max: u64, actual: usize }
            | e | { format_args!("too many kv results: {} > {}", e.actual, e.max) },

        InvalidConnectionId
            { query_id: u64, connection_id: String }
            [ connection_error::Error ]
            | e | {
                format_args!("registered query {} has invalid connection id: {}",
                    e.query_id, e.connection_id)
            },

        ConsensusStateNotFound
            { connection_id: String, height: Height }
            [ connection_error::Error ]
            | e | {
                format_args!("failed to get consensus state of connection {} at {}",
                    e.connection_id, e.height)
            },

        InvalidParams
            [ ParamsError ]
            | _ | { "module parameters are invalid" },

        Client
            [ client_error::Error ]
            | _ | { "ics02 client error" },

        Signer
            [ SignerError ]
            | _ | { "invalid signer address" },

        KvResultRejected
            { contract: String, query_id: u64 }
            [ CallbackError ]
            | e | {
                format_args!("contract {} rejected KV query result (query_id: {})",
                    e.contract, e.query_id)
            },

        TxResultRejected
            { contract: String, query_id: u64, tx_hash: String }
            [ CallbackError ]
            | e | {
                format_args!("contract {} rejected transaction query result (query_id: {}, tx_hash: {})",
                    e.contract, e.query_id, e.tx_hash)
            },
    }
}
