//! Fixtures for tests: dummy accounts and queries, genuine ICS23 store proofs and Tendermint
//! transaction proofs over generated headers.

use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, CommitmentProof, ExistenceProof, HostFunctionsManager,
    NonExistenceProof,
};
use icq_proto::neutron::interchainqueries::{
    Block, KvKey, RegisteredQuery as RawRegisteredQuery, TxValue,
};
use prost::Message;
use subtle_encoding::bech32;
use tendermint::merkle::Proof as SimpleProof;
use tendermint::Hash;
use tendermint_proto::crypto::{ProofOp, ProofOps};
use tendermint_proto::v0_38::abci::ExecTxResult;

use crate::applications::interchainqueries::query::QueryType;
use crate::applications::interchainqueries::verify::transaction::{
    deterministic_exec_tx_result, tx_hash,
};
use crate::clients::ics07_tendermint::header::Header;
use crate::clients::ics07_tendermint::proof::{leaf_hash, merkle_root, split_point};
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics23_commitment::specs::ProofSpecs;
use crate::mock::header::chained_headers_with;
use crate::prelude::*;

/// A `neutron` address over 20 bytes of `n`.
pub fn get_dummy_bech32_account(n: u8) -> String {
    bech32::encode("neutron", [n; 20])
}

/// A registered query owned by account 1 on `connection-0`. KV queries read one bank balance.
pub fn get_dummy_raw_registered_query(id: u64, query_type: QueryType) -> RawRegisteredQuery {
    let (keys, transactions_filter) = match query_type {
        QueryType::Kv => (
            vec![KvKey {
                path: "bank".to_string(),
                key: b"balances/alice".to_vec(),
            }],
            String::new(),
        ),
        QueryType::Tx => (
            vec![],
            r#"[{"field":"transfer.recipient","op":"Eq","value":"neutron1"}]"#.to_string(),
        ),
    };

    RawRegisteredQuery {
        id,
        owner: get_dummy_bech32_account(1),
        query_type: query_type.as_str().to_string(),
        keys,
        transactions_filter,
        connection_id: "connection-0".to_string(),
        update_period: 10,
        last_submitted_result_local_height: 0,
        last_submitted_result_remote_height: None,
        deposit: vec![],
        submit_timeout: 1_036_800,
        registered_at_height: 1,
    }
}

/// Proof specs of a two level store where both levels are simple Merkle trees.
pub fn test_proof_specs() -> ProofSpecs {
    vec![ics23::tendermint_spec(), ics23::tendermint_spec()].into()
}

/// A remote chain state holding one store named `prefix` with one `key`/`value` pair.
#[derive(Clone, Debug)]
pub struct StoreFixture {
    pub prefix: String,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    store_proof: ExistenceProof,
    root_proof: ExistenceProof,
}

impl StoreFixture {
    pub fn new(prefix: &str, key: &[u8], value: &[u8]) -> Self {
        let store_proof = leaf_existence_proof(key.to_vec(), value.to_vec());
        let store_root = existence_root(&store_proof);
        let root_proof = leaf_existence_proof(prefix.as_bytes().to_vec(), store_root);

        Self {
            prefix: prefix.to_string(),
            key: key.to_vec(),
            value: value.to_vec(),
            store_proof,
            root_proof,
        }
    }

    /// App hash of the remote chain.
    pub fn root(&self) -> CommitmentRoot {
        existence_root(&self.root_proof).into()
    }
}

fn leaf_existence_proof(key: Vec<u8>, value: Vec<u8>) -> ExistenceProof {
    ExistenceProof {
        key,
        value,
        leaf: ics23::tendermint_spec().leaf_spec,
        path: vec![],
    }
}

fn existence_root(proof: &ExistenceProof) -> Vec<u8> {
    calculate_existence_root::<HostFunctionsManager>(proof).expect("leaf proof has a root")
}

fn proof_op(kind: &str, key: &[u8], proof: Proof) -> ProofOp {
    ProofOp {
        r#type: kind.to_string(),
        key: key.to_vec(),
        data: CommitmentProof { proof: Some(proof) }.encode_to_vec(),
    }
}

/// Proof ops showing that the fixture's key holds its value.
pub fn existence_proof_ops(fx: &StoreFixture) -> ProofOps {
    ProofOps {
        ops: vec![
            proof_op("ics23:iavl", &fx.key, Proof::Exist(fx.store_proof.clone())),
            proof_op(
                "ics23:simple",
                fx.prefix.as_bytes(),
                Proof::Exist(fx.root_proof.clone()),
            ),
        ],
    }
}

/// Proof ops showing that `missing_key`, which must sort after the fixture's key, is absent.
pub fn non_existence_proof_ops(fx: &StoreFixture, missing_key: &[u8]) -> ProofOps {
    let absence = NonExistenceProof {
        key: missing_key.to_vec(),
        left: Some(fx.store_proof.clone()),
        right: None,
    };

    ProofOps {
        ops: vec![
            proof_op("ics23:iavl", missing_key, Proof::Nonexist(absence)),
            proof_op(
                "ics23:simple",
                fx.prefix.as_bytes(),
                Proof::Exist(fx.root_proof.clone()),
            ),
        ],
    }
}

/// Proof of the leaf at `index` of the Merkle tree over `items`.
pub fn simple_proof<T: AsRef<[u8]>>(items: &[T], index: usize) -> SimpleProof {
    SimpleProof {
        total: items.len() as u64,
        index: index as u64,
        leaf_hash: Hash::Sha256(leaf_hash(items[index].as_ref())),
        aunts: aunts(items, index).into_iter().map(Hash::Sha256).collect(),
    }
}

fn aunts<T: AsRef<[u8]>>(items: &[T], index: usize) -> Vec<[u8; 32]> {
    if items.len() <= 1 {
        return vec![];
    }

    let k = split_point(items.len() as u64) as usize;
    let (mut path, sibling) = if index < k {
        (aunts(&items[..k], index), merkle_root(&items[k..]))
    } else {
        (aunts(&items[k..], index - k), merkle_root(&items[..k]))
    };
    path.push(sibling);
    path
}

/// A successful execution result carrying `data`.
pub fn ok_response(data: &[u8]) -> ExecTxResult {
    ExecTxResult {
        code: 0,
        data: data.to_vec().into(),
        log: "[]".to_string(),
        gas_wanted: 200_000,
        gas_used: 85_000,
        ..Default::default()
    }
}

/// Two adjacent headers of a remote block holding the given transactions, together with
/// the inclusion and delivery proofs of each transaction.
#[derive(Clone, Debug)]
pub struct TxBlockFixture {
    pub header: Header,
    pub next_header: Header,
    pub txs: Vec<TxValue>,
}

impl TxBlockFixture {
    pub fn new(height: u64, txs: Vec<(Vec<u8>, ExecTxResult)>) -> Self {
        let hashes: Vec<[u8; 32]> = txs.iter().map(|(data, _)| tx_hash(data)).collect();
        let results: Vec<Vec<u8>> = txs
            .iter()
            .map(|(_, response)| deterministic_exec_tx_result(response))
            .collect();

        let (header, next_header) = chained_headers_with(
            height,
            Some(Hash::Sha256(merkle_root(&hashes))),
            Some(Hash::Sha256(merkle_root(&results))),
        );

        let txs = txs
            .into_iter()
            .enumerate()
            .map(|(index, (data, response))| TxValue {
                response: Some(response),
                delivery_proof: Some(simple_proof(&results, index).into()),
                inclusion_proof: Some(simple_proof(&hashes, index).into()),
                data,
            })
            .collect();

        Self {
            header,
            next_header,
            txs,
        }
    }

    pub fn block(&self) -> Block {
        Block {
            next_block_header: Some(self.next_header.clone().into()),
            header: Some(self.header.clone().into()),
            txs: self.txs.clone(),
        }
    }
}
