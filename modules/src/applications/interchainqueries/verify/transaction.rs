use prost::Message;
use sha2::{Digest, Sha256};
use tendermint::merkle::Proof;
use tendermint::Hash;

use crate::applications::interchainqueries::error::Error;
use crate::applications::interchainqueries::result::{ExecTxResult, TxValue};
use crate::clients::ics07_tendermint::header::Header;
use crate::clients::ics07_tendermint::proof::{decode_proof, verify_proof};
use crate::prelude::*;

/// Hash a transaction is identified by: the SHA-256 of its raw bytes.
pub fn tx_hash(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Encodes the part of an execution result every full node agrees on. These are the leaves
/// of `last_results_hash`; the field set must match the remote chain's consensus rules.
pub fn deterministic_exec_tx_result(response: &ExecTxResult) -> Vec<u8> {
    ExecTxResult {
        code: response.code,
        data: response.data.clone(),
        gas_wanted: response.gas_wanted,
        gas_used: response.gas_used,
        ..Default::default()
    }
    .encode_to_vec()
}

/// Proves that a transaction was included in a block and executed with the claimed result.
pub trait TransactionVerifier {
    fn verify_transaction(
        &self,
        header: &Header,
        next_header: &Header,
        tx: &TxValue,
    ) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TendermintTransactionVerifier;

impl TransactionVerifier for TendermintTransactionVerifier {
    /// Checks the inclusion proof against `header.data_hash` and the delivery proof against
    /// `next_header.last_results_hash`. Both must point at the same position in the block, and
    /// the transaction must have succeeded.
    fn verify_transaction(
        &self,
        header: &Header,
        next_header: &Header,
        tx: &TxValue,
    ) -> Result<(), Error> {
        let inclusion_proof = convert_proof("inclusion", tx.inclusion_proof.clone())?;
        verify_proof(
            &inclusion_proof,
            hash_bytes(&header.header().data_hash),
            &tx_hash(&tx.data),
        )
        .map_err(|e| {
            Error::invalid_proof(format!("it's impossible to verify inclusion proof: {}", e))
        })?;

        let response = tx
            .response
            .as_ref()
            .ok_or_else(|| Error::invalid_type("tx response is missing".to_string()))?;
        let delivery_proof = convert_proof("delivery", tx.delivery_proof.clone())?;
        verify_proof(
            &delivery_proof,
            hash_bytes(&next_header.header().last_results_hash),
            &deterministic_exec_tx_result(response),
        )
        .map_err(|e| {
            Error::invalid_proof(format!("it's impossible to verify delivery proof: {}", e))
        })?;

        if response.code != 0 {
            return Err(Error::internal(format!(
                "tx {} is unsuccessful: ResponseDelivery.Code = {}",
                hex_upper(&tx_hash(&tx.data)),
                response.code
            )));
        }

        if inclusion_proof.index != delivery_proof.index {
            return Err(Error::invalid_proof(format!(
                "inclusion proof index ({}) is not equal to delivery proof index ({})",
                inclusion_proof.index, delivery_proof.index
            )));
        }

        Ok(())
    }
}

fn convert_proof(
    what: &str,
    raw: Option<tendermint_proto::crypto::Proof>,
) -> Result<Proof, Error> {
    let raw = raw.ok_or_else(|| Error::invalid_type(format!("{} proof is missing", what)))?;
    decode_proof(raw).map_err(|e| {
        Error::invalid_type(format!(
            "failed to convert proto proof to merkle proof ({}): {}",
            what, e
        ))
    })
}

fn hash_bytes(hash: &Option<Hash>) -> Option<&[u8]> {
    hash.as_ref().map(Hash::as_bytes)
}

pub(crate) fn hex_upper(bytes: &[u8]) -> String {
    String::from_utf8(subtle_encoding::hex::encode_upper(bytes)).unwrap_or_default()
}
