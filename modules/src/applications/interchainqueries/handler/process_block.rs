//! Verification and delivery of the transactions of a TX query block.

use tracing::{debug, error};

use crate::applications::interchainqueries::context::{
    ContractCallbackSink, KvStore, LightClientGateway,
};
use crate::applications::interchainqueries::error::Error;
use crate::applications::interchainqueries::result::Block;
use crate::applications::interchainqueries::store::QueryStore;
use crate::applications::interchainqueries::verify::header::HeaderVerifier;
use crate::applications::interchainqueries::verify::transaction::{
    hex_upper, tx_hash, TransactionVerifier,
};
use crate::core::ics24_host::identifier::ClientId;
use crate::prelude::*;
use crate::signer::Signer;

/// Verifies the block's headers against the client, then each of its transactions in order.
/// Every transaction not yet submitted for `query_id` is marked as submitted and handed to the
/// query owner. Returns the hashes of the delivered transactions.
///
/// The marker is written before the owner's callback runs. If the callback fails, the error
/// aborts the block but the marker stays, and resubmitting the transaction is a no-op unless
/// the host discards the state writes of the failed message.
pub fn process_block<Ctx, HV, TV>(
    ctx: &mut Ctx,
    header_verifier: &HV,
    tx_verifier: &TV,
    owner: &Signer,
    query_id: u64,
    client_id: &ClientId,
    block: &Block,
) -> Result<Vec<[u8; 32]>, Error>
where
    Ctx: LightClientGateway + KvStore + ContractCallbackSink + ?Sized,
    HV: HeaderVerifier,
    TV: TransactionVerifier,
{
    let raw_header = block
        .header
        .as_ref()
        .ok_or_else(|| Error::proto_unmarshal("block header is missing".to_string()))?;
    let raw_next_header = block
        .next_block_header
        .as_ref()
        .ok_or_else(|| Error::proto_unmarshal("next block header is missing".to_string()))?;

    let header = header_verifier.unpack_header(raw_header)?;
    let next_header = header_verifier.unpack_header(raw_next_header)?;

    header_verifier
        .verify_headers(ctx, client_id, &header, &next_header)
        .map_err(|e| {
            error!(query_id, client_id = %client_id, height = %header.height(), "failed to verify headers: {}", e);
            Error::invalid_header(format!("failed to verify headers: {}", e))
        })?;

    let height = header.height();
    let mut delivered = Vec::new();

    for tx in &block.txs {
        let hash = tx_hash(&tx.data);
        let hash_hex = hex_upper(&hash);

        if ctx.is_tx_submitted(query_id, &hash) {
            debug!(query_id, tx_hash = %hash_hex, "transaction already submitted, skipping");
            continue;
        }

        tx_verifier
            .verify_transaction(&header, &next_header, tx)
            .map_err(|e| {
                error!(query_id, tx_hash = %hash_hex, "failed to verify transaction: {}", e);
                Error::internal(format!("failed to verify transaction {}: {}", hash_hex, e))
            })?;

        ctx.save_submitted_tx(query_id, &hash);

        ctx.sudo_tx_query_result(owner, query_id, height, &tx.data)
            .map_err(|e| {
                error!(query_id, tx_hash = %hash_hex, contract = %owner, "contract rejected transaction query result: {}", e);
                Error::tx_result_rejected(owner.to_string(), query_id, hash_hex.clone(), e)
            })?;

        debug!(query_id, tx_hash = %hash_hex, %height, "transaction delivered");
        delivered.push(hash);
    }

    Ok(delivered)
}
