//! ICS3 (connection) context.

use crate::core::ics02_client::context::ClientReader;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::error::Error;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::Height;

/// A context supplying all the necessary read-only dependencies for resolving connections.
pub trait ConnectionReader: ClientReader {
    /// Returns the ConnectionEnd for the given identifier `conn_id`.
    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, Error>;

    /// Consensus root of the client behind `conn_id` at `height`.
    fn connection_consensus_root(
        &self,
        conn_id: &ConnectionId,
        height: Height,
    ) -> Result<CommitmentRoot, Error> {
        let connection_end = self.connection_end(conn_id)?;
        self.consensus_root(connection_end.client_id(), height)
            .map_err(Error::client)
    }
}
