//! Module identity and the byte layout of everything the interchain queries module persists.
//!
//! Every key is produced here and nowhere else.

use crate::prelude::*;

pub const MODULE_ID_STR: &str = "interchainqueries";
pub const ROUTER_KEY: &str = MODULE_ID_STR;

/// `registered_query/<id-be64>`
pub const REGISTERED_QUERY_KEY_PREFIX: u8 = 0x01;
/// `registered_query_result/<id-be64>`
pub const REGISTERED_QUERY_RESULT_KEY_PREFIX: u8 = 0x02;
/// `submitted_tx/<id-be64>/<tx_hash>`
pub const SUBMITTED_TX_KEY_PREFIX: u8 = 0x03;
/// `last_registered_query_id`
pub const LAST_REGISTERED_QUERY_ID_KEY: &[u8] = &[0x64];

fn prefixed_id(prefix: u8, id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + 8);
    key.push(prefix);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

pub fn registered_query_key(query_id: u64) -> Vec<u8> {
    prefixed_id(REGISTERED_QUERY_KEY_PREFIX, query_id)
}

pub fn registered_query_result_key(query_id: u64) -> Vec<u8> {
    prefixed_id(REGISTERED_QUERY_RESULT_KEY_PREFIX, query_id)
}

/// De-duplication marker of a transaction already delivered for a TX query.
pub fn submitted_tx_key(query_id: u64, tx_hash: &[u8]) -> Vec<u8> {
    let mut key = prefixed_id(SUBMITTED_TX_KEY_PREFIX, query_id);
    key.extend_from_slice(tx_hash);
    key
}

pub fn last_registered_query_id_key() -> Vec<u8> {
    LAST_REGISTERED_QUERY_ID_KEY.to_vec()
}
