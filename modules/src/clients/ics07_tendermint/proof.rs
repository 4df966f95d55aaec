//! Simple Merkle proofs as Tendermint commits them over a block's transactions (`data_hash`)
//! and over the deterministic execution results of the previous block (`last_results_hash`).

use subtle_encoding::hex;
use tendermint::crypto::default::Sha256;
use tendermint::merkle::{simple_hash_from_byte_vectors, Hash, MerkleHash, Proof};
use tendermint_proto::crypto::Proof as RawProof;

use crate::clients::ics07_tendermint::error::Error;
use crate::prelude::*;

/// Maximum number of aunts a proof may carry; bounds the tree at 2^100 leaves.
pub const MAX_AUNTS: usize = 100;

/// Root of the tree over `items`, in order.
pub fn merkle_root<T: AsRef<[u8]>>(items: &[T]) -> Hash {
    simple_hash_from_byte_vectors::<Sha256>(items)
}

pub fn leaf_hash(leaf: &[u8]) -> Hash {
    Sha256::default().leaf_hash(leaf)
}

/// Decodes a relayer-supplied proof.
pub fn decode_proof(raw: RawProof) -> Result<Proof, Error> {
    if raw.aunts.len() > MAX_AUNTS {
        return Err(Error::too_many_aunts(MAX_AUNTS, raw.aunts.len()));
    }
    Proof::try_from(raw).map_err(Error::invalid_raw_proof)
}

/// Checks that `leaf` hashes to the proven leaf and that the aunts lead from it to `root`.
pub fn verify_proof(proof: &Proof, root: Option<&[u8]>, leaf: &[u8]) -> Result<(), Error> {
    let root = root.ok_or_else(Error::missing_root_hash)?;

    let leaf_hash = leaf_hash(leaf);
    if leaf_hash[..] != *proof.leaf_hash.as_bytes() {
        return Err(Error::leaf_hash_mismatch(
            encode_hex(&leaf_hash),
            encode_hex(proof.leaf_hash.as_bytes()),
        ));
    }

    let computed = compute_root_hash(proof)?;
    if computed.as_slice() != root {
        return Err(Error::root_hash_mismatch(
            encode_hex(root),
            encode_hex(&computed),
        ));
    }

    Ok(())
}

pub fn compute_root_hash(proof: &Proof) -> Result<Hash, Error> {
    compute_hash_from_aunts(
        &mut Sha256::default(),
        proof.index,
        proof.total,
        proof.leaf_hash,
        &proof.aunts,
    )
    .ok_or_else(|| Error::invalid_proof_shape(proof.index, proof.total))
}

/// Largest power of two strictly less than `length`.
pub(crate) fn split_point(length: u64) -> u64 {
    debug_assert!(length > 1);
    length.next_power_of_two() / 2
}

fn compute_hash_from_aunts<H: MerkleHash>(
    hasher: &mut H,
    index: u64,
    total: u64,
    leaf_hash: Hash,
    aunts: &[Hash],
) -> Option<Hash> {
    if index >= total || total == 0 {
        return None;
    }
    match total {
        1 => aunts.is_empty().then_some(leaf_hash),
        _ => {
            let (last, rest) = aunts.split_last()?;
            let num_left = split_point(total);
            if index < num_left {
                let left = compute_hash_from_aunts(hasher, index, num_left, leaf_hash, rest)?;
                Some(hasher.inner_hash(left, *last))
            } else {
                let right = compute_hash_from_aunts(
                    hasher,
                    index - num_left,
                    total - num_left,
                    leaf_hash,
                    rest,
                )?;
                Some(hasher.inner_hash(*last, right))
            }
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    String::from_utf8(hex::encode_upper(bytes)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ics07_tendermint::error::ErrorDetail;
    use crate::test_utils::simple_proof;
    use test_log::test;

    fn items() -> Vec<Vec<u8>> {
        (0u8..5).map(|i| vec![i; 3]).collect()
    }

    #[test]
    fn split_point_is_largest_power_of_two_below() {
        assert_eq!(split_point(2), 1);
        assert_eq!(split_point(3), 2);
        assert_eq!(split_point(4), 2);
        assert_eq!(split_point(5), 4);
        assert_eq!(split_point(100), 64);
    }

    #[test]
    fn every_leaf_proves_against_root() {
        let items = items();
        let root = merkle_root(&items);

        for (index, item) in items.iter().enumerate() {
            let proof = simple_proof(&items, index);
            assert_eq!(proof.index, index as u64);
            assert_eq!(compute_root_hash(&proof).unwrap(), root);
            verify_proof(&proof, Some(root.as_slice()), item).unwrap();
        }
    }

    #[test]
    fn single_leaf_tree_root_is_leaf_hash() {
        let items = vec![b"only".to_vec()];
        let root = merkle_root(&items);

        assert_eq!(root, leaf_hash(b"only"));
        verify_proof(&simple_proof(&items, 0), Some(root.as_slice()), b"only").unwrap();
    }

    #[test]
    fn wrong_leaf_is_rejected() {
        let items = items();
        let root = merkle_root(&items);

        let err = verify_proof(&simple_proof(&items, 1), Some(root.as_slice()), &items[2])
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::LeafHashMismatch(_)));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let items = items();
        let other_root = merkle_root(&items[..4]);

        let err = verify_proof(&simple_proof(&items, 1), Some(other_root.as_slice()), &items[1])
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::RootHashMismatch(_)));
    }

    #[test]
    fn missing_root_is_rejected() {
        let items = items();
        let err = verify_proof(&simple_proof(&items, 0), None, &items[0]).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::MissingRootHash(_)));
    }

    #[test]
    fn index_out_of_range_is_rejected() {
        let items = items();
        let root = merkle_root(&items);
        let proof = Proof {
            index: 5,
            ..simple_proof(&items, 4)
        };

        let err = verify_proof(&proof, Some(root.as_slice()), &items[4]).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidProofShape(_)));
    }

    #[test]
    fn raw_proof_basic_validation() {
        let items = items();
        let raw = RawProof::from(simple_proof(&items, 3));

        let mut negative = raw.clone();
        negative.index = -1;
        let err = decode_proof(negative).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidRawProof(_)));

        let mut short_leaf = raw.clone();
        short_leaf.leaf_hash.pop();
        let err = decode_proof(short_leaf).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidRawProof(_)));

        let mut too_many = raw.clone();
        too_many.aunts = vec![vec![0; 32]; MAX_AUNTS + 1];
        let err = decode_proof(too_many).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::TooManyAunts(_)));

        assert_eq!(decode_proof(raw).unwrap(), simple_proof(&items, 3));
    }
}
