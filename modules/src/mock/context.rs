//! Implementation of a host chain context mock. Used in testing the interchain queries
//! handlers and verifiers.

use alloc::collections::{BTreeMap, BTreeSet};

use crate::applications::interchainqueries::context::{
    CallbackError, ContractCallbackSink, IcqContext, KvStore,
};
use crate::clients::ics07_tendermint::header::Header;
use crate::config::Params;
use crate::core::ics02_client::context::{ClientKeeper, ClientReader};
use crate::core::ics02_client::error::Error as Ics02Error;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::context::ConnectionReader;
use crate::core::ics03_connection::error::Error as Ics03Error;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics23_commitment::specs::ProofSpecs;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::prelude::*;
use crate::signer::Signer;
use crate::test_utils::test_proof_specs;
use crate::Height;

/// State of a light client tracked by the mock host.
#[derive(Clone, Debug)]
pub struct MockClientRecord {
    /// Height the client was created at. Headers must be above it.
    pub trusted_height: Height,
    pub latest_height: Height,
    pub frozen: bool,
    pub consensus_roots: BTreeMap<Height, CommitmentRoot>,
    /// Heights of the headers applied through `update_client`, in order.
    pub updates: Vec<Height>,
}

impl MockClientRecord {
    fn new(trusted_height: Height) -> Self {
        Self {
            trusted_height,
            latest_height: trusted_height,
            frozen: false,
            consensus_roots: BTreeMap::new(),
            updates: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KvCallback {
    pub contract: Signer,
    pub query_id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxCallback {
    pub contract: Signer,
    pub query_id: u64,
    pub height: Height,
    pub data: Vec<u8>,
}

/// A context implementing every dependency of the interchain queries module in memory.
#[derive(Clone, Debug)]
pub struct MockContext {
    /// Height of the block the host is executing.
    host_height: u64,

    params: Params,

    /// The set of all clients, indexed by their id.
    clients: BTreeMap<ClientId, MockClientRecord>,

    /// Proof specs shared by all clients.
    proof_specs: ProofSpecs,

    /// All the connections in the store.
    connections: BTreeMap<ConnectionId, ConnectionEnd>,

    /// Header heights every client refuses to be updated with.
    rejected_headers: BTreeSet<Height>,

    /// Module store.
    store: BTreeMap<Vec<u8>, Vec<u8>>,

    /// Every callback attempt, accepted or not.
    kv_callbacks: Vec<KvCallback>,
    tx_callbacks: Vec<TxCallback>,

    reject_kv_callbacks: bool,
    reject_tx_callbacks: bool,
}

impl Default for MockContext {
    fn default() -> Self {
        Self {
            host_height: 100,
            params: Params::default(),
            clients: BTreeMap::new(),
            proof_specs: test_proof_specs(),
            connections: BTreeMap::new(),
            rejected_headers: BTreeSet::new(),
            store: BTreeMap::new(),
            kv_callbacks: Vec::new(),
            tx_callbacks: Vec::new(),
            reject_kv_callbacks: false,
            reject_tx_callbacks: false,
        }
    }
}

impl MockContext {
    /// Identifier of the client added by `with_tendermint_client`.
    pub fn default_client_id(&self) -> ClientId {
        ClientId::default()
    }

    /// Identifier of the connection added by `with_tendermint_client`.
    pub fn default_connection_id(&self) -> ConnectionId {
        ConnectionId::new(0)
    }

    /// Adds a Tendermint client trusted at `height`, reachable through the default connection.
    pub fn with_tendermint_client(mut self, height: Height) -> Self {
        let client_id = self.default_client_id();
        self.connections.insert(
            self.default_connection_id(),
            ConnectionEnd::new(client_id.clone()),
        );
        self.clients
            .insert(client_id, MockClientRecord::new(height));
        self
    }

    /// Records `root` as the default client's consensus root at `height`.
    pub fn with_consensus_root(mut self, height: Height, root: CommitmentRoot) -> Self {
        let client_id = self.default_client_id();
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.consensus_roots.insert(height, root);
        }
        self
    }

    pub fn with_frozen_client(mut self) -> Self {
        let client_id = self.default_client_id();
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.frozen = true;
        }
        self
    }

    pub fn with_proof_specs(self, proof_specs: ProofSpecs) -> Self {
        Self {
            proof_specs,
            ..self
        }
    }

    /// Makes every client refuse headers at `height`.
    pub fn with_rejected_header(mut self, height: Height) -> Self {
        self.rejected_headers.insert(height);
        self
    }

    pub fn with_host_height(self, host_height: u64) -> Self {
        Self {
            host_height,
            ..self
        }
    }

    pub fn with_params(self, params: Params) -> Self {
        Self { params, ..self }
    }

    pub fn with_rejecting_kv_callbacks(self) -> Self {
        Self {
            reject_kv_callbacks: true,
            ..self
        }
    }

    pub fn with_rejecting_tx_callbacks(self) -> Self {
        Self {
            reject_tx_callbacks: true,
            ..self
        }
    }

    pub fn accept_tx_callbacks(&mut self) {
        self.reject_tx_callbacks = false;
    }

    /// Heights of the headers applied to `client_id` so far.
    pub fn client_updates(&self, client_id: &ClientId) -> Vec<Height> {
        self.clients
            .get(client_id)
            .map(|client| client.updates.clone())
            .unwrap_or_default()
    }

    pub fn kv_callbacks(&self) -> &[KvCallback] {
        &self.kv_callbacks
    }

    pub fn tx_callbacks(&self) -> &[TxCallback] {
        &self.tx_callbacks
    }

    /// Runs `f` as a single host transaction: every state write it made is discarded when it
    /// returns an error.
    pub fn deliver<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let snapshot = self.clone();
        let res = f(self);
        if res.is_err() {
            *self = snapshot;
        }
        res
    }
}

impl ClientReader for MockContext {
    fn proof_specs(&self, client_id: &ClientId) -> Result<ProofSpecs, Ics02Error> {
        if !self.clients.contains_key(client_id) {
            return Err(Ics02Error::client_not_found(client_id.clone()));
        }
        Ok(self.proof_specs.clone())
    }

    fn consensus_root(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<CommitmentRoot, Ics02Error> {
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| Ics02Error::client_not_found(client_id.clone()))?;

        client
            .consensus_roots
            .get(&height)
            .cloned()
            .ok_or_else(|| Ics02Error::consensus_state_not_found(client_id.clone(), height))
    }
}

impl ClientKeeper for MockContext {
    /// Accepts any header above the client's trusted height that was not configured to be
    /// rejected. The header's app hash becomes the consensus root at its height.
    fn update_client(&mut self, client_id: &ClientId, header: &Header) -> Result<(), Ics02Error> {
        let client = self
            .clients
            .get_mut(client_id)
            .ok_or_else(|| Ics02Error::client_not_found(client_id.clone()))?;

        if client.frozen {
            return Err(Ics02Error::client_frozen(client_id.clone()));
        }

        let height = header.height();
        if height <= client.trusted_height {
            return Err(Ics02Error::low_header_height(height, client.trusted_height));
        }
        if self.rejected_headers.contains(&height) {
            return Err(Ics02Error::header_verification_failure(format!(
                "header at {} is not signed by the trusted validators",
                height
            )));
        }

        client.consensus_roots.insert(
            height,
            CommitmentRoot::from_bytes(header.header().app_hash.as_bytes()),
        );
        client.latest_height = client.latest_height.max(height);
        client.updates.push(height);
        Ok(())
    }
}

impl ConnectionReader for MockContext {
    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, Ics03Error> {
        self.connections
            .get(conn_id)
            .cloned()
            .ok_or_else(|| Ics03Error::connection_not_found(conn_id.clone()))
    }
}

impl KvStore for MockContext {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.store.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.store.remove(key);
    }
}

impl ContractCallbackSink for MockContext {
    fn sudo_kv_query_result(
        &mut self,
        contract: &Signer,
        query_id: u64,
    ) -> Result<Vec<u8>, CallbackError> {
        self.kv_callbacks.push(KvCallback {
            contract: contract.clone(),
            query_id,
        });
        if self.reject_kv_callbacks {
            return Err(CallbackError::rejected("KV result rejected".to_string()));
        }
        Ok(Vec::new())
    }

    fn sudo_tx_query_result(
        &mut self,
        contract: &Signer,
        query_id: u64,
        height: Height,
        data: &[u8],
    ) -> Result<Vec<u8>, CallbackError> {
        self.tx_callbacks.push(TxCallback {
            contract: contract.clone(),
            query_id,
            height,
            data: data.to_vec(),
        });
        if self.reject_tx_callbacks {
            return Err(CallbackError::rejected("transaction rejected".to_string()));
        }
        Ok(Vec::new())
    }
}

impl IcqContext for MockContext {
    fn host_height(&self) -> u64 {
        self.host_height
    }

    fn params(&self) -> Params {
        self.params.clone()
    }
}
