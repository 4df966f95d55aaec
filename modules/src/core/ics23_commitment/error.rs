use flex_error::{define_error, TraceError};
use prost::DecodeError;

use crate::prelude::*;

define_error! {
    #[derive(Debug, PartialEq, Eq)]
    Error {
        MissingProofOps
            | _ | { "proof ops are missing or empty" },

        CommitmentProofDecodingFailed
            [ TraceError<DecodeError> ]
            | _ | { "failed to decode commitment proof" },

        EmptyMerkleProof
            | _ | { "empty merkle proof" },

        EmptyMerkleRoot
            | _ | { "empty merkle root" },

        EmptyVerifiedValue
            | _ | { "empty verified value" },

        NumberOfSpecsMismatch
            { specs: usize, proofs: usize }
            | e | { format_args!("mismatch between the number of proofs ({0}) and the number of proof specs ({1})", e.proofs, e.specs) },

        NumberOfKeysMismatch
            { keys: usize, proofs: usize }
            | e | { format_args!("mismatch between the number of proofs ({0}) and the number of keys ({1})", e.proofs, e.keys) },

        InvalidMerkleProof
            | _ | { "invalid merkle proof" },

        UnknownProofType
            { kind: String }
            | e | { format_args!("unknown proof type {0}", e.kind) },

        VerificationFailure
            | _ | { "failed to verify membership" },
    }
}
