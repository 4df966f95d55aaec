//! Interchain queries context. The host chain provides the light client (through the ICS 02
//! and ICS 03 traits), a key/value store for module state, the contract callback sink and a
//! few read-only facts about itself. See `IcqContext` for the full set.

use flex_error::define_error;

use crate::config::Params;
use crate::core::ics02_client::context::ClientKeeper;
use crate::core::ics03_connection::context::ConnectionReader;
use crate::prelude::*;
use crate::signer::Signer;
use crate::Height;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    CallbackError {
        ContractNotFound
            { contract: String }
            | e | { format_args!("no contract found at address {}", e.contract) },

        Rejected
            { reason: String }
            | e | { format_args!("sudo call failed: {}", e.reason) },
    }
}

/// Operations of the host's light client the engine depends on: authenticating headers and
/// resolving connections to consensus roots.
pub trait LightClientGateway: ClientKeeper + ConnectionReader {}

impl<T: ClientKeeper + ConnectionReader + ?Sized> LightClientGateway for T {}

/// Raw key/value access to the module's own store.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

/// Entry points of the contracts owning registered queries.
pub trait ContractCallbackSink {
    /// Tells `contract` that a new KV result for `query_id` is stored and can be read.
    fn sudo_kv_query_result(
        &mut self,
        contract: &Signer,
        query_id: u64,
    ) -> Result<Vec<u8>, CallbackError>;

    /// Hands `contract` a verified transaction of the remote block at `height`.
    fn sudo_tx_query_result(
        &mut self,
        contract: &Signer,
        query_id: u64,
        height: Height,
        data: &[u8],
    ) -> Result<Vec<u8>, CallbackError>;
}

/// Everything the interchain queries handlers need from the host chain.
pub trait IcqContext: LightClientGateway + KvStore + ContractCallbackSink {
    /// Height of the local (host) chain block being executed.
    fn host_height(&self) -> u64;

    /// Current module parameters.
    fn params(&self) -> Params;
}
