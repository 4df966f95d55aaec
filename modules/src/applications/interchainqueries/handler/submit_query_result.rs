//! Protocol logic of `MsgSubmitQueryResult`: verifies a relayer's KV or TX result for a
//! registered query and stores or delivers it.

use icq_proto::neutron::interchainqueries::{
    KvKey, MsgSubmitQueryResult as RawMsgSubmitQueryResult,
};
use tracing::debug;

use crate::applications::interchainqueries::context::IcqContext;
use crate::applications::interchainqueries::error::Error;
use crate::applications::interchainqueries::handler::process_block::process_block;
use crate::applications::interchainqueries::msgs::submit_query_result::MsgSubmitQueryResult;
use crate::applications::interchainqueries::query::{QueryType, RegisteredQuery};
use crate::applications::interchainqueries::result::{
    result_height, Block, QueryResult, StorageValue,
};
use crate::applications::interchainqueries::store::QueryStore;
use crate::applications::interchainqueries::verify::header::{
    HeaderVerifier, TendermintHeaderVerifier,
};
use crate::applications::interchainqueries::verify::storage::verify_storage_values;
use crate::applications::interchainqueries::verify::transaction::{
    TendermintTransactionVerifier, TransactionVerifier,
};
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::prelude::*;
use crate::Height;

/// The result following the successful processing of a `MsgSubmitQueryResult` message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Result {
    pub query_id: u64,
    pub query_type: QueryType,
    /// KV results only: the remote height the stored result was read at.
    pub remote_height: Option<Height>,
    /// TX results only: hashes of the transactions handed to the query owner.
    pub delivered_txs: Vec<[u8; 32]>,
}

/// Handles a submission with the Tendermint header and transaction verifiers.
pub fn process<Ctx: IcqContext + ?Sized>(
    ctx: &mut Ctx,
    msg: RawMsgSubmitQueryResult,
) -> HandlerResult<Result, Error> {
    process_with(
        ctx,
        &TendermintHeaderVerifier,
        &TendermintTransactionVerifier,
        msg,
    )
}

pub fn process_with<Ctx, HV, TV>(
    ctx: &mut Ctx,
    header_verifier: &HV,
    tx_verifier: &TV,
    msg: RawMsgSubmitQueryResult,
) -> HandlerResult<Result, Error>
where
    Ctx: IcqContext + ?Sized,
    HV: HeaderVerifier,
    TV: TransactionVerifier,
{
    let mut output = HandlerOutput::builder();

    let params = ctx.params();
    params.validate().map_err(Error::invalid_params)?;
    MsgSubmitQueryResult::validate_basic(&msg, &params)?;

    let MsgSubmitQueryResult {
        query_id,
        sender,
        client_id: _,
        result,
    } = MsgSubmitQueryResult::try_from(msg)?;

    debug!(query_id, sender = %sender, "submit query result");

    let query = ctx.get_query_by_id(query_id).map_err(|e| {
        debug!(query_id, "failed to get query by id: {}", e);
        e
    })?;

    let connection = ctx.connection_end(&query.connection_id).map_err(|e| {
        Error::invalid_connection_id(query_id, query.connection_id.to_string(), e)
    })?;

    if !result.kv_results.is_empty() {
        let remote_height = submit_kv_result(ctx, &query, &connection, result)?;
        output.log(format!(
            "success: stored KV result for query {} at remote height {}",
            query_id, remote_height
        ));
        return Ok(output.with_result(Result {
            query_id,
            query_type: QueryType::Kv,
            remote_height: Some(remote_height),
            delivered_txs: Vec::new(),
        }));
    }

    let block = result.block.unwrap_or_default();
    let delivered_txs = submit_block(
        ctx,
        header_verifier,
        tx_verifier,
        &query,
        &connection,
        &block,
    )?;
    output.log(format!(
        "success: delivered {} transactions for query {}",
        delivered_txs.len(),
        query_id
    ));

    Ok(output.with_result(Result {
        query_id,
        query_type: QueryType::Tx,
        remote_height: None,
        delivered_txs,
    }))
}

fn submit_kv_result<Ctx: IcqContext + ?Sized>(
    ctx: &mut Ctx,
    query: &RegisteredQuery,
    connection: &ConnectionEnd,
    mut result: QueryResult,
) -> core::result::Result<Height, Error> {
    let query_id = query.id;

    if !query.query_type.is_kv() {
        return Err(Error::invalid_type(format!(
            "invalid query result for query type: {}",
            query.query_type
        )));
    }

    let height = result_height(&result);
    if query.last_submitted_result_remote_height >= height {
        return Err(Error::invalid_height(format!(
            "result height {} must be greater than the last submitted remote height {}",
            height, query.last_submitted_result_remote_height
        )));
    }

    if result.kv_results.len() != query.keys.len() {
        return Err(Error::invalid_submitted_result(format!(
            "KV keys length from result is not equal to registered query keys length: {} != {}",
            result.kv_results.len(),
            query.keys.len()
        )));
    }

    // the app hash of block H is committed in the header of block H+1
    let proof_height = height.increment().ok_or_else(|| {
        Error::invalid_height(format!("no block follows result height {}", height))
    })?;
    let root = ctx
        .connection_consensus_root(&query.connection_id, proof_height)
        .map_err(|e| {
            debug!(query_id, height = %proof_height, "failed to get consensus state: {}", e);
            Error::consensus_state_not_found(query.connection_id.to_string(), proof_height, e)
        })?;
    let specs = ctx
        .proof_specs(connection.client_id())
        .map_err(Error::client)?;

    let check =
        |index: usize, value: &StorageValue| check_registered_key(&query.keys, index, value);
    verify_storage_values(&mut result.kv_results, &root, &specs, Some(&check)).map_err(|e| {
        debug!(query_id, %height, "failed to verify KV result: {}", e);
        e
    })?;

    let host_height = ctx.host_height();
    ctx.save_kv_query_result(query_id, &result, host_height)?;
    debug!(query_id, %height, "stored KV query result");

    if result.allow_kv_callbacks {
        ctx.sudo_kv_query_result(&query.owner, query_id)
            .map_err(|e| {
                debug!(query_id, contract = %query.owner, "contract rejected KV query result: {}", e);
                Error::kv_result_rejected(query.owner.to_string(), query_id, e)
            })?;
    }

    Ok(height)
}

fn check_registered_key(
    keys: &[KvKey],
    index: usize,
    value: &StorageValue,
) -> core::result::Result<(), Error> {
    let registered = keys.get(index).ok_or_else(|| {
        Error::invalid_submitted_result(format!("no registered key at index {}", index))
    })?;

    if value.key != registered.key {
        return Err(Error::invalid_submitted_result(format!(
            "KV key from result is not equal to registered query key: {:?} != {:?}",
            value.key, registered.key
        )));
    }

    if value.storage_prefix != registered.path {
        return Err(Error::invalid_submitted_result(format!(
            "KV path from result is not equal to registered query storage prefix: {} != {}",
            value.storage_prefix, registered.path
        )));
    }

    Ok(())
}

fn submit_block<Ctx, HV, TV>(
    ctx: &mut Ctx,
    header_verifier: &HV,
    tx_verifier: &TV,
    query: &RegisteredQuery,
    connection: &ConnectionEnd,
    block: &Block,
) -> core::result::Result<Vec<[u8; 32]>, Error>
where
    Ctx: IcqContext + ?Sized,
    HV: HeaderVerifier,
    TV: TransactionVerifier,
{
    if !query.query_type.is_tx() {
        return Err(Error::invalid_type(format!(
            "invalid query result for query type: {}",
            query.query_type
        )));
    }

    let delivered = process_block(
        ctx,
        header_verifier,
        tx_verifier,
        &query.owner,
        query.id,
        connection.client_id(),
        block,
    )
    .map_err(|e| {
        debug!(query_id = query.id, "failed to process block: {}", e);
        e
    })?;

    let host_height = ctx.host_height();
    ctx.update_last_local_height(query.id, host_height)?;

    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::interchainqueries::error::ErrorDetail;
    use crate::applications::interchainqueries::verify::transaction::tx_hash;
    use crate::config::Params;
    use crate::mock::context::MockContext;
    use crate::test_utils::{
        existence_proof_ops, get_dummy_bech32_account, get_dummy_raw_registered_query,
        non_existence_proof_ops, ok_response, StoreFixture, TxBlockFixture,
    };
    use test_log::test;

    const CLIENT_STATE_KEY: &[u8] = b"clients/07-tendermint-0/clientState";
    const MISSING_KEY: &[u8] = b"clients/07-tendermint-9/clientState";
    const CLIENT_STATE: &[u8] = b"tendermint client state bytes";
    const REMOTE_HEIGHT: u64 = 20;
    const HOST_HEIGHT: u64 = 77;

    fn fixture() -> StoreFixture {
        StoreFixture::new("ibc", CLIENT_STATE_KEY, CLIENT_STATE)
    }

    fn context(fx: &StoreFixture) -> MockContext {
        MockContext::default()
            .with_tendermint_client(Height::new(0, 5))
            .with_consensus_root(Height::new(0, REMOTE_HEIGHT + 1), fx.root())
            .with_host_height(HOST_HEIGHT)
    }

    fn register_kv_query(ctx: &mut MockContext, key: &[u8]) -> u64 {
        let id = ctx.next_query_id();
        let mut raw = get_dummy_raw_registered_query(id, QueryType::Kv);
        raw.keys = vec![KvKey {
            path: "ibc".to_string(),
            key: key.to_vec(),
        }];
        ctx.save_query(raw.try_into().unwrap());
        id
    }

    fn register_tx_query(ctx: &mut MockContext) -> u64 {
        let id = ctx.next_query_id();
        let raw = get_dummy_raw_registered_query(id, QueryType::Tx);
        ctx.save_query(raw.try_into().unwrap());
        id
    }

    fn msg(query_id: u64, result: QueryResult) -> RawMsgSubmitQueryResult {
        RawMsgSubmitQueryResult {
            query_id,
            sender: get_dummy_bech32_account(2),
            client_id: "07-tendermint-0".to_string(),
            result: Some(result),
        }
    }

    fn kv_result(value: StorageValue, height: u64) -> QueryResult {
        QueryResult {
            kv_results: vec![value],
            block: None,
            height,
            revision: 0,
            allow_kv_callbacks: false,
        }
    }

    fn existing_value(fx: &StoreFixture) -> StorageValue {
        StorageValue {
            storage_prefix: "ibc".to_string(),
            key: CLIENT_STATE_KEY.to_vec(),
            value: CLIENT_STATE.to_vec(),
            proof: Some(existence_proof_ops(fx)),
        }
    }

    fn block_result(fx: &TxBlockFixture) -> QueryResult {
        QueryResult {
            kv_results: vec![],
            block: Some(fx.block()),
            height: fx.header.height().revision_height,
            revision: 0,
            allow_kv_callbacks: false,
        }
    }

    #[test]
    fn kv_result_is_stored_unchanged() {
        let fx = fixture();
        let mut ctx = context(&fx);
        let query_id = register_kv_query(&mut ctx, CLIENT_STATE_KEY);

        let output = process(
            &mut ctx,
            msg(query_id, kv_result(existing_value(&fx), REMOTE_HEIGHT)),
        )
        .unwrap();
        assert_eq!(output.result.query_type, QueryType::Kv);
        assert_eq!(
            output.result.remote_height,
            Some(Height::new(0, REMOTE_HEIGHT))
        );

        let stored = ctx.get_query_result_by_id(query_id).unwrap();
        assert_eq!(stored.kv_results[0].value, CLIENT_STATE.to_vec());
        assert!(stored.kv_results[0].proof.is_none());

        let query = ctx.get_query_by_id(query_id).unwrap();
        assert_eq!(
            query.last_submitted_result_remote_height,
            Height::new(0, REMOTE_HEIGHT)
        );
        assert_eq!(query.last_submitted_result_local_height, HOST_HEIGHT);
        assert!(ctx.kv_callbacks().is_empty());
    }

    #[test]
    fn absent_key_is_stored_empty() {
        let fx = fixture();
        let mut ctx = context(&fx);
        let query_id = register_kv_query(&mut ctx, MISSING_KEY);

        let value = StorageValue {
            storage_prefix: "ibc".to_string(),
            key: MISSING_KEY.to_vec(),
            value: b"whatever the relayer claims".to_vec(),
            proof: Some(non_existence_proof_ops(&fx, MISSING_KEY)),
        };
        process(&mut ctx, msg(query_id, kv_result(value, REMOTE_HEIGHT))).unwrap();

        let stored = ctx.get_query_result_by_id(query_id).unwrap();
        assert!(stored.kv_results[0].value.is_empty());
    }

    #[test]
    fn kv_submission_failures() {
        struct Test {
            name: String,
            key: &'static [u8],
            result: QueryResult,
            want: fn(&ErrorDetail) -> bool,
        }

        let fx = fixture();

        let mut tampered = existing_value(&fx);
        tampered.value[0] ^= 0x01;

        let mut other_path = existing_value(&fx);
        other_path.storage_prefix = "bank".to_string();

        let tests: Vec<Test> = vec![
            Test {
                name: "Tampered value".to_string(),
                key: CLIENT_STATE_KEY,
                result: kv_result(tampered, REMOTE_HEIGHT),
                want: |e| matches!(e, ErrorDetail::InvalidProof(_)),
            },
            Test {
                name: "Key differs from the registered one".to_string(),
                key: MISSING_KEY,
                result: kv_result(existing_value(&fx), REMOTE_HEIGHT),
                want: |e| matches!(e, ErrorDetail::InvalidStorageValue(_)),
            },
            Test {
                name: "Path differs from the registered one".to_string(),
                key: CLIENT_STATE_KEY,
                result: kv_result(other_path, REMOTE_HEIGHT),
                want: |e| matches!(e, ErrorDetail::InvalidStorageValue(_)),
            },
            Test {
                name: "More values than registered keys".to_string(),
                key: CLIENT_STATE_KEY,
                result: QueryResult {
                    kv_results: vec![existing_value(&fx), existing_value(&fx)],
                    ..kv_result(existing_value(&fx), REMOTE_HEIGHT)
                },
                want: |e| matches!(e, ErrorDetail::InvalidSubmittedResult(_)),
            },
            Test {
                name: "No consensus state at height + 1".to_string(),
                key: CLIENT_STATE_KEY,
                result: kv_result(existing_value(&fx), REMOTE_HEIGHT + 5),
                want: |e| matches!(e, ErrorDetail::ConsensusStateNotFound(_)),
            },
            Test {
                name: "Height without a following block".to_string(),
                key: CLIENT_STATE_KEY,
                result: kv_result(existing_value(&fx), u64::MAX),
                want: |e| matches!(e, ErrorDetail::InvalidHeight(_)),
            },
            Test {
                name: "Block for a KV query".to_string(),
                key: CLIENT_STATE_KEY,
                result: block_result(&TxBlockFixture::new(10, vec![])),
                want: |e| matches!(e, ErrorDetail::InvalidType(_)),
            },
        ];

        for test in tests {
            let mut ctx = context(&fx);
            let query_id = register_kv_query(&mut ctx, test.key);

            let res = ctx.deliver(|ctx| process(ctx, msg(query_id, test.result)));
            match res {
                Ok(_) => panic!("{}: unexpected success", test.name),
                Err(e) => assert!((test.want)(e.detail()), "{}: unexpected error {}", test.name, e),
            }
            assert!(
                ctx.get_query_result_by_id(query_id).is_err(),
                "{}: result stored",
                test.name
            );
        }
    }

    #[test]
    fn kv_height_must_increase() {
        let fx = fixture();
        let mut ctx = context(&fx);
        let query_id = register_kv_query(&mut ctx, CLIENT_STATE_KEY);

        let submit = msg(query_id, kv_result(existing_value(&fx), REMOTE_HEIGHT));
        process(&mut ctx, submit.clone()).unwrap();

        let err = process(&mut ctx, submit).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidHeight(_)));
    }

    #[test]
    fn kv_callbacks() {
        let fx = fixture();
        let mut result = kv_result(existing_value(&fx), REMOTE_HEIGHT);
        result.allow_kv_callbacks = true;

        let mut ctx = context(&fx);
        let query_id = register_kv_query(&mut ctx, CLIENT_STATE_KEY);
        process(&mut ctx, msg(query_id, result.clone())).unwrap();
        assert_eq!(ctx.kv_callbacks().len(), 1);
        assert_eq!(ctx.kv_callbacks()[0].query_id, query_id);

        let mut ctx = context(&fx).with_rejecting_kv_callbacks();
        let query_id = register_kv_query(&mut ctx, CLIENT_STATE_KEY);
        let res = ctx.deliver(|ctx| process(ctx, msg(query_id, result)));
        assert!(matches!(
            res.unwrap_err().detail(),
            ErrorDetail::KvResultRejected(_)
        ));
        assert!(ctx.get_query_result_by_id(query_id).is_err());
    }

    #[test]
    fn unknown_query_or_connection() {
        let fx = fixture();
        let mut ctx = context(&fx);

        let err = process(
            &mut ctx,
            msg(9, kv_result(existing_value(&fx), REMOTE_HEIGHT)),
        )
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidQueryId(_)));

        let id = ctx.next_query_id();
        let mut raw = get_dummy_raw_registered_query(id, QueryType::Kv);
        raw.connection_id = "connection-7".to_string();
        ctx.save_query(raw.try_into().unwrap());

        let err = process(
            &mut ctx,
            msg(id, kv_result(existing_value(&fx), REMOTE_HEIGHT)),
        )
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidConnectionId(_)));
    }

    #[test]
    fn invalid_message_or_params() {
        let fx = fixture();
        let mut ctx = context(&fx);
        let query_id = register_kv_query(&mut ctx, CLIENT_STATE_KEY);

        let err = process(&mut ctx, msg(query_id, QueryResult::default())).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::EmptyResult(_)));

        let params = Params {
            max_kv_query_keys_count: 0,
            ..Params::default()
        };
        let mut ctx = context(&fx).with_params(params);
        let query_id = register_kv_query(&mut ctx, CLIENT_STATE_KEY);
        let err = process(
            &mut ctx,
            msg(query_id, kv_result(existing_value(&fx), REMOTE_HEIGHT)),
        )
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidParams(_)));
    }

    #[test]
    fn tx_result_is_delivered() {
        let block = TxBlockFixture::new(10, vec![(b"transfer".to_vec(), ok_response(b"ok"))]);
        let mut ctx = context(&fixture());
        let query_id = register_tx_query(&mut ctx);

        let output = process(&mut ctx, msg(query_id, block_result(&block))).unwrap();
        assert_eq!(output.result.query_type, QueryType::Tx);
        assert_eq!(output.result.delivered_txs, vec![tx_hash(b"transfer")]);

        let query = ctx.get_query_by_id(query_id).unwrap();
        assert_eq!(query.last_submitted_result_local_height, HOST_HEIGHT);
        assert!(query.last_submitted_result_remote_height.is_zero());

        let calls = ctx.tx_callbacks();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].height, Height::new(0, 10));
        assert_eq!(calls[0].contract, query.owner);
    }

    #[test]
    fn tx_result_failures() {
        let fx = fixture();

        let mut ctx = context(&fx);
        let kv_query = register_kv_query(&mut ctx, CLIENT_STATE_KEY);
        let tx_query = register_tx_query(&mut ctx);

        let err = process(
            &mut ctx,
            msg(tx_query, kv_result(existing_value(&fx), REMOTE_HEIGHT)),
        )
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidType(_)));

        let block = TxBlockFixture::new(10, vec![(b"transfer".to_vec(), ok_response(b"ok"))]);
        let err = process(&mut ctx, msg(kv_query, block_result(&block))).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidType(_)));

        let far = TxBlockFixture::new(11, vec![]);
        let mut result = block_result(&block);
        if let Some(b) = result.block.as_mut() {
            b.next_block_header = far.block().next_block_header;
        }
        let res = ctx.deliver(|ctx| process(ctx, msg(tx_query, result)));
        assert!(matches!(
            res.unwrap_err().detail(),
            ErrorDetail::InvalidHeader(_)
        ));
        assert!(!ctx.is_tx_submitted(tx_query, &tx_hash(b"transfer")));
        assert!(ctx
            .client_updates(&ctx.default_client_id())
            .is_empty());
    }
}
