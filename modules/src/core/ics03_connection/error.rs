use flex_error::define_error;

use crate::core::ics02_client::error as client_error;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::prelude::*;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    Error {
        Client
            [ client_error::Error ]
            | _ | { "ics02 client error" },

        ConnectionNotFound
            { connection_id: ConnectionId }
            | e | {
                format_args!("no connection was found for the previous connection id provided {0}",
                    e.connection_id)
            },
    }
}
