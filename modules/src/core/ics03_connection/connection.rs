use serde::{Deserialize, Serialize};

use crate::core::ics24_host::identifier::ClientId;

/// The local end of a connection, as far as query verification is concerned: the client that
/// tracks the remote chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEnd {
    client_id: ClientId,
}

impl ConnectionEnd {
    pub fn new(client_id: ClientId) -> Self {
        Self { client_id }
    }

    /// Getter for the client id on the local party of this connection end.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }
}
