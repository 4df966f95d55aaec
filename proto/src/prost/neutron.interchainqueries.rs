/// RegisteredQuery is a query that a contract registered on this chain and that relayers
/// keep answering with proofs from the remote chain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisteredQuery {
    /// The unique id of the registered query.
    #[prost(uint64, tag = "1")]
    pub id: u64,
    /// The address of the contract that registered the query.
    #[prost(string, tag = "2")]
    pub owner: ::prost::alloc::string::String,
    /// The query type identifier: `kv` or `tx`.
    #[prost(string, tag = "3")]
    pub query_type: ::prost::alloc::string::String,
    /// The KV-storage keys for which we want to get values from remote chain.
    #[prost(message, repeated, tag = "4")]
    pub keys: ::prost::alloc::vec::Vec<KvKey>,
    /// The filter for transaction search ICQ.
    #[prost(string, tag = "5")]
    pub transactions_filter: ::prost::alloc::string::String,
    /// The IBC connection ID for getting ConsensusState to verify proofs.
    #[prost(string, tag = "6")]
    pub connection_id: ::prost::alloc::string::String,
    /// Parameter that defines how often the query must be updated.
    #[prost(uint64, tag = "7")]
    pub update_period: u64,
    /// The local chain last block height when the query result was updated.
    #[prost(uint64, tag = "8")]
    pub last_submitted_result_local_height: u64,
    /// The remote chain last block height when the query result was updated.
    #[prost(message, optional, tag = "9")]
    pub last_submitted_result_remote_height:
        ::core::option::Option<::ibc_proto::ibc::core::client::v1::Height>,
    /// Amount of coins deposited for the query.
    #[prost(message, repeated, tag = "10")]
    pub deposit: ::prost::alloc::vec::Vec<::ibc_proto::cosmos::base::v1beta1::Coin>,
    /// Timeout before query becomes available for everybody to remove.
    #[prost(uint64, tag = "11")]
    pub submit_timeout: u64,
    /// The local chain height when the query was registered.
    #[prost(uint64, tag = "12")]
    pub registered_at_height: u64,
}
/// KVKey is a path + key pair addressing one value in the remote chain store.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KvKey {
    /// Path (storage prefix) to the storage where you want to read value by key
    /// (usually name of cosmos-sdk module: 'staking', 'bank', etc.)
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    /// Key you want to read from the storage
    #[prost(bytes = "vec", tag = "2")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
/// MsgSubmitQueryResult carries a relayer-submitted result for a registered query.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSubmitQueryResult {
    #[prost(uint64, tag = "1")]
    pub query_id: u64,
    #[prost(string, tag = "2")]
    pub sender: ::prost::alloc::string::String,
    /// is used to prove TX query result
    #[prost(string, tag = "3")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "4")]
    pub result: ::core::option::Option<QueryResult>,
}
/// QueryResult contains the result of a KV or TX query.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryResult {
    #[prost(message, repeated, tag = "1")]
    pub kv_results: ::prost::alloc::vec::Vec<StorageValue>,
    #[prost(message, optional, tag = "2")]
    pub block: ::core::option::Option<Block>,
    #[prost(uint64, tag = "3")]
    pub height: u64,
    #[prost(uint64, tag = "4")]
    pub revision: u64,
    #[prost(bool, tag = "5")]
    pub allow_kv_callbacks: bool,
}
/// StorageValue is a single KV result with the proof of its (non-)existence.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StorageValue {
    /// is the substore name (acc, staking, etc.)
    #[prost(string, tag = "1")]
    pub storage_prefix: ::prost::alloc::string::String,
    /// is the key in IAVL store
    #[prost(bytes = "vec", tag = "2")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    /// is the value in IAVL store
    #[prost(bytes = "vec", tag = "3")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    /// is the Merkle Proof which proves existence of key-value pair in IAVL
    /// storage
    #[prost(message, optional, tag = "4")]
    pub proof: ::core::option::Option<::tendermint_proto::crypto::ProofOps>,
}
/// Block carries two adjacent headers and the transactions proven against them.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    /// We need to know block X+1 to verify response of transaction for block X
    /// since LastResultsHash is root hash of all results from the txs from the
    /// previous block
    #[prost(message, optional, tag = "1")]
    pub next_block_header: ::core::option::Option<::ibc_proto::google::protobuf::Any>,
    /// We need to know block X to verify inclusion of transaction for block X
    #[prost(message, optional, tag = "2")]
    pub header: ::core::option::Option<::ibc_proto::google::protobuf::Any>,
    #[prost(message, repeated, tag = "3")]
    pub txs: ::prost::alloc::vec::Vec<TxValue>,
}
/// TxValue is a remote transaction together with its inclusion and delivery proofs.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxValue {
    #[prost(message, optional, tag = "1")]
    pub response: ::core::option::Option<::tendermint_proto::v0_38::abci::ExecTxResult>,
    /// is the Merkle Proof which proves existence of response in block with
    /// height next_block_header.Height
    #[prost(message, optional, tag = "2")]
    pub delivery_proof: ::core::option::Option<::tendermint_proto::crypto::Proof>,
    /// is the Merkle Proof which proves existence of data in block with height
    /// header.Height
    #[prost(message, optional, tag = "3")]
    pub inclusion_proof: ::core::option::Option<::tendermint_proto::crypto::Proof>,
    /// is body of the transaction
    #[prost(bytes = "vec", tag = "4")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}
/// MsgSubmitQueryResultResponse is the (empty) response to a result submission.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSubmitQueryResultResponse {}
