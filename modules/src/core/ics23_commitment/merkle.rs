use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
    HostFunctionsManager, NonExistenceProof,
};
use tendermint_proto::crypto::ProofOps as RawProofOps;

use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics23_commitment::error::Error;
use crate::core::ics23_commitment::specs::ProofSpecs;
use crate::prelude::*;

/// Keys of a value across the nested stores of the remote chain, represented root-to-leaf:
/// the store name (storage prefix) first, the raw key within that store last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    key_path: Vec<Vec<u8>>,
}

impl MerklePath {
    pub fn new(storage_prefix: &str, key: &[u8]) -> Self {
        Self {
            key_path: vec![storage_prefix.as_bytes().to_vec(), key.to_vec()],
        }
    }

    pub fn key_path(&self) -> &[Vec<u8>] {
        &self.key_path
    }
}

/// The kind of witness carried by the innermost proof of a `MerkleProof`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeafWitness {
    /// The key is present in the innermost store with the claimed value.
    Existence,
    /// The key is absent from the innermost store.
    NonExistence,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    proofs: Vec<CommitmentProof>,
}

/// Decodes every op of a Tendermint `ProofOps` as an ICS23 `CommitmentProof`, innermost store
/// first.
impl TryFrom<&RawProofOps> for MerkleProof {
    type Error = Error;

    fn try_from(proof_ops: &RawProofOps) -> Result<Self, Self::Error> {
        if proof_ops.ops.is_empty() {
            return Err(Error::missing_proof_ops());
        }

        let proofs = proof_ops
            .ops
            .iter()
            .map(|op| {
                prost::Message::decode(op.data.as_slice())
                    .map_err(Error::commitment_proof_decoding_failed)
            })
            .collect::<Result<Vec<CommitmentProof>, _>>()?;

        Ok(Self { proofs })
    }
}

impl From<Vec<CommitmentProof>> for MerkleProof {
    fn from(proofs: Vec<CommitmentProof>) -> Self {
        Self { proofs }
    }
}

impl MerkleProof {
    pub fn proofs(&self) -> &[CommitmentProof] {
        &self.proofs
    }

    /// Identifies the witness of the innermost proof. A non-existence proof always comes first,
    /// so this decides between membership and non-membership verification. Batch and compressed
    /// proofs are not accepted.
    pub fn leaf_witness(&self) -> Result<LeafWitness, Error> {
        let first = self.proofs.first().ok_or_else(Error::empty_merkle_proof)?;
        match &first.proof {
            Some(Proof::Exist(_)) => Ok(LeafWitness::Existence),
            Some(Proof::Nonexist(_)) => Ok(LeafWitness::NonExistence),
            Some(Proof::Batch(_)) => Err(Error::unknown_proof_type("batch".to_string())),
            Some(Proof::Compressed(_)) => Err(Error::unknown_proof_type("compressed".to_string())),
            None => Err(Error::unknown_proof_type("none".to_string())),
        }
    }

    pub fn verify_membership(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        keys: &MerklePath,
        value: Vec<u8>,
        start_index: usize,
    ) -> Result<(), Error> {
        // validate arguments
        self.validate_arguments(specs, root, keys)?;
        if value.is_empty() {
            return Err(Error::empty_verified_value());
        }

        let mut subroot = value.clone();
        let mut value = value;
        // keys are represented from root-to-leaf
        for ((proof, spec), key) in self
            .proofs
            .iter()
            .zip(specs.iter())
            .zip(keys.key_path.iter().rev())
            .skip(start_index)
        {
            match &proof.proof {
                Some(Proof::Exist(existence_proof)) => {
                    subroot = calculate_existence_root::<HostFunctionsManager>(existence_proof)
                        .map_err(|_| Error::invalid_merkle_proof())?;

                    if !verify_membership::<HostFunctionsManager>(
                        proof, spec, &subroot, key, &value,
                    ) {
                        return Err(Error::verification_failure());
                    }
                    value = subroot.clone();
                }
                _ => return Err(Error::invalid_merkle_proof()),
            }
        }

        if root.as_bytes() != subroot.as_slice() {
            return Err(Error::verification_failure());
        }

        Ok(())
    }

    pub fn verify_non_membership(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        keys: &MerklePath,
    ) -> Result<(), Error> {
        // validate arguments
        self.validate_arguments(specs, root, keys)?;

        // verify the absence of key in lowest subtree
        let proof = self.proofs.first().ok_or_else(Error::invalid_merkle_proof)?;
        let spec = specs.iter().next().ok_or_else(Error::invalid_merkle_proof)?;
        // keys are represented from root-to-leaf
        let key = keys
            .key_path
            .last()
            .ok_or_else(Error::invalid_merkle_proof)?;
        match &proof.proof {
            Some(Proof::Nonexist(non_existence_proof)) => {
                let subroot = calculate_non_existence_root(non_existence_proof)?;

                if !verify_non_membership::<HostFunctionsManager>(proof, spec, &subroot, key) {
                    return Err(Error::verification_failure());
                }

                // verify membership proofs starting from index 1 with value = subroot
                self.verify_membership(specs, root, keys, subroot, 1)
            }
            _ => Err(Error::invalid_merkle_proof()),
        }
    }

    fn validate_arguments(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        keys: &MerklePath,
    ) -> Result<(), Error> {
        if self.proofs.is_empty() {
            return Err(Error::empty_merkle_proof());
        }
        if root.is_empty() {
            return Err(Error::empty_merkle_root());
        }
        let num = self.proofs.len();
        if specs.len() != num {
            return Err(Error::number_of_specs_mismatch(specs.len(), num));
        }
        if keys.key_path.len() != num {
            return Err(Error::number_of_keys_mismatch(keys.key_path.len(), num));
        }
        Ok(())
    }
}

fn calculate_non_existence_root(proof: &NonExistenceProof) -> Result<Vec<u8>, Error> {
    if let Some(left) = &proof.left {
        calculate_existence_root::<HostFunctionsManager>(left)
            .map_err(|_| Error::invalid_merkle_proof())
    } else if let Some(right) = &proof.right {
        calculate_existence_root::<HostFunctionsManager>(right)
            .map_err(|_| Error::invalid_merkle_proof())
    } else {
        Err(Error::invalid_merkle_proof())
    }
}
