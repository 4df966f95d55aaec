use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::lightclients::tendermint::v1::Header as RawHeader;
use prost::Message;
use serde::{Deserialize, Serialize};
use tendermint::block::signed_header::SignedHeader;
use tendermint::block::Header as BlockHeader;
use tendermint::validator::Set as ValidatorSet;
use tendermint::Hash;

use crate::clients::ics07_tendermint::error::Error;
use crate::prelude::*;
use crate::Height;

pub const TENDERMINT_HEADER_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.Header";

/// Tendermint consensus header
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Header {
    pub signed_header: SignedHeader, // contains the commitment root
    pub validator_set: ValidatorSet, // the validator set that signed Header
    pub trusted_height: Height, // the height of a trusted header seen by client less than or equal to Header
    pub trusted_validator_set: ValidatorSet, // the last trusted validator set at trusted height
}

impl core::fmt::Debug for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, " Header {{...}}")
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "Header {{ signed_header: {}, validator_set: {}, trusted_height: {}, trusted_validator_set: {} }}",
            PrettySignedHeader(&self.signed_header),
            PrettyValidatorSet(&self.validator_set),
            self.trusted_height,
            PrettyValidatorSet(&self.trusted_validator_set)
        )
    }
}

impl Header {
    /// The block header this light client header wraps.
    pub fn header(&self) -> &BlockHeader {
        &self.signed_header.header
    }

    /// Height of the wrapped block, in the revision of the trusted height it builds upon.
    pub fn height(&self) -> Height {
        Height::from_block_height(
            self.trusted_height.revision_number,
            self.signed_header.header.height,
        )
    }

    /// Tendermint block hash of the wrapped header, as referenced by the next block's
    /// `last_block_id`.
    pub fn hash(&self) -> Hash {
        self.signed_header.header.hash()
    }
}

impl TryFrom<RawHeader> for Header {
    type Error = Error;

    fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
        let header = Self {
            signed_header: raw
                .signed_header
                .ok_or_else(Error::missing_signed_header)?
                .try_into()
                .map_err(|e| Error::invalid_header("signed header conversion".to_string(), e))?,
            validator_set: raw
                .validator_set
                .ok_or_else(Error::missing_validator_set)?
                .try_into()
                .map_err(Error::invalid_raw_header)?,
            trusted_height: raw.trusted_height.map(Height::from).unwrap_or_default(),
            trusted_validator_set: raw
                .trusted_validators
                .ok_or_else(Error::missing_trusted_validator_set)?
                .try_into()
                .map_err(Error::invalid_raw_header)?,
        };

        Ok(header)
    }
}

impl TryFrom<Any> for Header {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        decode_header(&raw)
    }
}

/// Decodes a Tendermint light client header packed into an `Any`, rejecting every other
/// header type.
pub fn decode_header(raw: &Any) -> Result<Header, Error> {
    match raw.type_url.as_str() {
        TENDERMINT_HEADER_TYPE_URL => RawHeader::decode(raw.value.as_slice())
            .map_err(Error::decode)?
            .try_into(),
        _ => Err(Error::unknown_header_type(raw.type_url.clone())),
    }
}

impl From<Header> for RawHeader {
    fn from(value: Header) -> Self {
        RawHeader {
            signed_header: Some(value.signed_header.into()),
            validator_set: Some(value.validator_set.into()),
            trusted_height: Some(value.trusted_height.into()),
            trusted_validators: Some(value.trusted_validator_set.into()),
        }
    }
}

impl From<Header> for Any {
    fn from(header: Header) -> Self {
        Any {
            type_url: TENDERMINT_HEADER_TYPE_URL.to_string(),
            value: RawHeader::from(header).encode_to_vec(),
        }
    }
}

struct PrettySignedHeader<'a>(&'a SignedHeader);

impl Display for PrettySignedHeader<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "SignedHeader {{ header: {{ chain_id: {}, height: {} }}, commit: {{ height: {} }} }}",
            self.0.header.chain_id, self.0.header.height, self.0.commit.height
        )
    }
}

struct PrettyValidatorSet<'a>(&'a ValidatorSet);

impl Display for PrettyValidatorSet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "ValidatorSet {{ validators: {}, total_voting_power: {} }}",
            self.0.validators().len(),
            self.0.total_voting_power()
        )
    }
}
