use ibc_proto::google::protobuf::Any;
use tracing::debug;

use crate::applications::interchainqueries::context::LightClientGateway;
use crate::applications::interchainqueries::error::Error;
use crate::clients::ics07_tendermint::header::{decode_header, Header};
use crate::core::ics24_host::identifier::ClientId;
use crate::prelude::*;

/// Checks that `next` directly follows `header`: adjacent heights, continuous validator sets
/// and a `last_block_id` pointing back at `header`.
pub fn check_headers_order(header: &Header, next: &Header) -> Result<(), Error> {
    let (current, following) = (header.header(), next.header());

    if following.height.value() != current.height.value() + 1 {
        return Err(Error::invalid_header(format!(
            "next header height ({}) must be equal to header height + 1 ({})",
            following.height,
            current.height.value() + 1
        )));
    }

    if current.next_validators_hash != following.validators_hash {
        return Err(Error::invalid_header(format!(
            "header.NextValidatorsHash is not equal to nextHeader.ValidatorsHash: {} != {}",
            current.next_validators_hash, following.validators_hash
        )));
    }

    let hash = header.hash();
    match &following.last_block_id {
        Some(last_block_id) if last_block_id.hash == hash => Ok(()),
        Some(last_block_id) => Err(Error::invalid_header(format!(
            "header.Hash() is not equal to nextHeader.LastBlockID.Hash: {} != {}",
            hash, last_block_id.hash
        ))),
        None => Err(Error::invalid_header(format!(
            "nextHeader.LastBlockID is missing, expected hash {}",
            hash
        ))),
    }
}

/// Authenticates the two headers of a TX query block.
pub trait HeaderVerifier {
    fn unpack_header(&self, any: &Any) -> Result<Header, Error>;

    fn verify_headers<G: LightClientGateway + ?Sized>(
        &self,
        gateway: &mut G,
        client_id: &ClientId,
        header: &Header,
        next_header: &Header,
    ) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TendermintHeaderVerifier;

impl HeaderVerifier for TendermintHeaderVerifier {
    fn unpack_header(&self, any: &Any) -> Result<Header, Error> {
        decode_header(any).map_err(|e| {
            Error::proto_unmarshal(format!("failed to unpack {}: {}", any.type_url, e))
        })
    }

    /// Updates the client with `header`, then with `next_header`, and only then checks their
    /// order. The first update is applied before the pair is known to be adjacent, so the
    /// caller must discard all state writes when this returns an error.
    fn verify_headers<G: LightClientGateway + ?Sized>(
        &self,
        gateway: &mut G,
        client_id: &ClientId,
        header: &Header,
        next_header: &Header,
    ) -> Result<(), Error> {
        gateway
            .update_client(client_id, header)
            .map_err(Error::client)?;
        debug!(client_id = %client_id, height = %header.height(), "updated client with header");

        gateway
            .update_client(client_id, next_header)
            .map_err(Error::client)?;
        debug!(client_id = %client_id, height = %next_header.height(), "updated client with next header");

        check_headers_order(header, next_header)
    }
}
