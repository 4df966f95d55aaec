use flex_error::{define_error, DisplayOnly, TraceError};

use crate::prelude::*;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    Error {
        MissingSignedHeader
            | _ | { "missing signed header" },

        MissingValidatorSet
            | _ | { "missing validator set" },

        MissingTrustedValidatorSet
            | _ | { "missing trusted validator set" },

        InvalidHeader
            { reason: String }
            [ DisplayOnly<tendermint::Error> ]
            | e | { format_args!("invalid header, failed basic validation: {}", e.reason) },

        InvalidRawHeader
            [ DisplayOnly<tendermint::Error> ]
            | _ | { "invalid raw header" },

        UnknownHeaderType
            { header_type: String }
            | e | { format_args!("unknown header type: {0}", e.header_type) },

        Decode
            [ TraceError<prost::DecodeError> ]
            | _ | { "decode error" },

        InvalidRawProof
            [ DisplayOnly<tendermint::Error> ]
            | _ | { "invalid raw merkle proof" },

        TooManyAunts
            { max: usize, actual: usize }
            | e | { format_args!("expected no more than {0} aunts, got {1}", e.max, e.actual) },

        MissingRootHash
            | _ | { "invalid root hash: cannot be nil" },

        LeafHashMismatch
            { wanted: String, got: String }
            | e | { format_args!("invalid leaf hash: wanted {0} got {1}", e.wanted, e.got) },

        RootHashMismatch
            { wanted: String, got: String }
            | e | { format_args!("invalid root hash: wanted {0} got {1}", e.wanted, e.got) },

        InvalidProofShape
            { index: u64, total: u64 }
            | e | {
                format_args!("aunts do not describe a path to leaf {0} of a tree of {1} leaves",
                    e.index, e.total)
            },
    }
}
