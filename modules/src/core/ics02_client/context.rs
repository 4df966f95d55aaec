//! ICS2 (client) context. The two traits `ClientReader` and `ClientKeeper` define the part of
//! the host's light client the interchain queries engine depends on. The trust algorithm itself
//! (trusted heights, validator set fractions) stays behind `ClientKeeper::update_client`.

use crate::clients::ics07_tendermint::header::Header;
use crate::core::ics02_client::error::Error;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics23_commitment::specs::ProofSpecs;
use crate::core::ics24_host::identifier::ClientId;
use crate::Height;

/// Defines the read-only part of ICS2 (client functions) context.
pub trait ClientReader {
    /// Proof specs the client's counterparty commits its stores with, outermost store last.
    fn proof_specs(&self, client_id: &ClientId) -> Result<ProofSpecs, Error>;

    /// Root of the consensus state recorded for `client_id` at exactly `height`.
    fn consensus_root(&self, client_id: &ClientId, height: Height) -> Result<CommitmentRoot, Error>;
}

/// Defines the write-only part of ICS2 (client functions) context.
pub trait ClientKeeper {
    /// Authenticates `header` against the client's current trust root and, on success, advances
    /// the client's tracked consensus state to it.
    ///
    /// This mutates light client state. Callers must run inside a state transition that is
    /// discarded as a whole when any later check fails.
    fn update_client(&mut self, client_id: &ClientId, header: &Header) -> Result<(), Error>;
}
