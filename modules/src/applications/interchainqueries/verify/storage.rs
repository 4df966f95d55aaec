use tracing::debug;

use crate::applications::interchainqueries::error::Error;
use crate::applications::interchainqueries::result::StorageValue;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics23_commitment::merkle::{LeafWitness, MerklePath, MerkleProof};
use crate::core::ics23_commitment::specs::ProofSpecs;
use crate::prelude::*;

/// Extra check run against every value before its proof, given the value's index.
pub type StorageValueCheck<'a> = &'a dyn Fn(usize, &StorageValue) -> Result<(), Error>;

/// Verifies every value's proof against `root`. Values proven absent have their `value`
/// cleared, which only happens once all of them verified.
pub fn verify_storage_values(
    values: &mut [StorageValue],
    root: &CommitmentRoot,
    specs: &ProofSpecs,
    check: Option<StorageValueCheck<'_>>,
) -> Result<(), Error> {
    let mut absent = Vec::new();

    for (index, value) in values.iter().enumerate() {
        let proof_ops = value.proof.as_ref().ok_or_else(|| {
            Error::invalid_type(format!("storage value {} carries no proof", index))
        })?;
        let proof = MerkleProof::try_from(proof_ops).map_err(|e| {
            Error::invalid_type(format!(
                "failed to convert crypto.ProofOps to MerkleProof: {}",
                e
            ))
        })?;

        if let Some(check) = check {
            check(index, value).map_err(|e| Error::invalid_storage_value(index, e))?;
        }

        let path = MerklePath::new(&value.storage_prefix, &value.key);
        let witness = proof.leaf_witness().map_err(|e| {
            Error::invalid_proof(format!("unknown proof type for value {}: {}", index, e))
        })?;

        match witness {
            LeafWitness::NonExistence => {
                proof
                    .verify_non_membership(specs, root, &path)
                    .map_err(|e| {
                        Error::invalid_proof(format!(
                            "failed to verify proof of absence of key {:?}: {}",
                            value.key, e
                        ))
                    })?;
                absent.push(index);
            }
            LeafWitness::Existence => {
                proof
                    .verify_membership(specs, root, &path, value.value.clone(), 0)
                    .map_err(|e| {
                        Error::invalid_proof(format!(
                            "failed to verify proof of key {:?}: {}",
                            value.key, e
                        ))
                    })?;
            }
        }
    }

    for index in absent {
        debug!(index, "storage value proven absent");
        values[index].value = Vec::new();
    }

    Ok(())
}
