use flex_error::define_error;

use crate::core::ics24_host::identifier::ClientId;
use crate::prelude::*;
use crate::Height;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    Error {
        ClientNotFound
            { client_id: ClientId }
            | e | { format_args!("client not found: {0}", e.client_id) },

        ClientFrozen
            { client_id: ClientId }
            | e | { format_args!("client is frozen: {0}", e.client_id) },

        ConsensusStateNotFound
            { client_id: ClientId, height: Height }
            | e | {
                format_args!("consensus state not found at: {0} for client: {1}",
                    e.height, e.client_id)
            },

        LowHeaderHeight
            {
                header_height: Height,
                latest_height: Height
            }
            | e | {
                format!("received header height ({:?}) is lower than (or equal to) client latest height ({:?})",
                    e.header_height, e.latest_height)
            },

        HeaderVerificationFailure
            { reason: String }
            | e | { format_args!("verification failed: {:?}", e.reason) },
    }
}
