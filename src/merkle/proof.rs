//! Merkle proof types and verification

use crate::hash::DigestHasher;
use crate::types::Digest;

/// The side a sibling digest occupies relative to the node being proven
///
/// Recording the side per step is what lets the verifier reproduce the
/// exact concatenation order the tree was built with. Deriving the order
/// from the queried element's index parity instead silently breaks for
/// any element whose position parity changes between levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The sibling is the left operand of the pair hash
    Left,
    /// The sibling is the right operand of the pair hash
    Right,
}

/// One level of a membership proof: a sibling digest and its side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofStep {
    /// The sibling digest to combine with at this level
    pub digest: Digest,
    /// The side the sibling occupies in the pair
    pub side: Side,
}

/// A membership proof: one [`ProofStep`] per level below the root
///
/// Steps are ordered leaf level first. A single-leaf tree has an empty
/// proof; the leaf digest is the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    /// The proof steps, leaf level first
    pub steps: Vec<ProofStep>,
}

/// Verifies a membership proof against an expected root
///
/// Recomputes a running digest starting from the element's leaf digest;
/// at each step the sibling is concatenated on the side the proof
/// recorded and the pair is hashed. The proof is valid iff the final
/// digest equals the expected root. Invalid proofs yield `false`, never
/// an error.
///
/// # Arguments
/// * `hasher` - The hash implementation the tree was built with
/// * `element` - The element whose membership is claimed
/// * `proof` - The proof steps for the element's position
/// * `root` - The expected root digest
///
/// # Returns
/// Whether replaying the aggregation reproduces `root`
pub fn verify_proof<H: DigestHasher>(
    hasher: &H,
    element: &[u8],
    proof: &MerkleProof,
    root: &Digest,
) -> bool {
    let mut current = hasher.digest(element);
    for step in &proof.steps {
        current = match step.side {
            Side::Left => hasher.hash_pair(&step.digest, &current),
            Side::Right => hasher.hash_pair(&current, &step.digest),
        };
    }
    current == *root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, MerkleError};
    use crate::hash::Sha256Hasher;
    use crate::merkle::MerkleTree;

    #[test]
    fn test_proof_round_trip_all_indices() {
        let elements = ["e0", "e1", "e2", "e3", "e4", "e5", "e6", "e7"];

        for size in 1..=elements.len() {
            let tree =
                MerkleTree::new(&elements[..size]).expect("construction should succeed");
            for (index, element) in elements[..size].iter().enumerate() {
                let proof = tree.proof(index).expect("proof generation should succeed");

                assert!(
                    verify_proof(tree.hasher(), element.as_bytes(), &proof, &tree.root()),
                    "proof for index {index} of {size} leaves should verify"
                );
            }
        }
    }

    #[test]
    fn test_proof_rejects_tampering() {
        let tree =
            MerkleTree::new(&["e0", "e1", "e2", "e3", "e4"]).expect("construction should succeed");
        let proof = tree.proof(2).expect("proof generation should succeed");
        let root = tree.root();

        assert!(verify_proof(tree.hasher(), b"e2", &proof, &root));

        // Wrong element.
        assert!(!verify_proof(tree.hasher(), b"e3", &proof, &root));

        // Tampered sibling digest.
        let mut tampered_digest = proof.clone();
        tampered_digest.steps[0].digest[0] ^= 1;
        assert!(!verify_proof(tree.hasher(), b"e2", &tampered_digest, &root));

        // Flipped side.
        let mut flipped_side = proof.clone();
        flipped_side.steps[0].side = match flipped_side.steps[0].side {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        assert!(!verify_proof(tree.hasher(), b"e2", &flipped_side, &root));

        // Wrong root.
        let mut wrong_root = root;
        wrong_root[31] ^= 1;
        assert!(!verify_proof(tree.hasher(), b"e2", &proof, &wrong_root));
    }

    #[test]
    fn test_proof_index_out_of_range() {
        let tree = MerkleTree::new(&["a", "b", "c"]).expect("construction should succeed");

        let result = tree.proof(3);

        assert_eq!(
            result,
            Err(Error::Merkle(MerkleError::IndexOutOfRange { index: 3, leaf_count: 3 }))
        );
    }

    #[test]
    fn test_proof_for_element() {
        let tree = MerkleTree::new(&["a", "b", "c"]).expect("construction should succeed");

        let proof =
            tree.proof_for_element(b"b").expect("proof for a present element should succeed");

        assert!(verify_proof(tree.hasher(), b"b", &proof, &tree.root()));

        let absent = tree.proof_for_element(b"d");

        assert_eq!(absent, Err(Error::Merkle(MerkleError::ElementNotFound)));
    }

    #[test]
    fn test_sibling_sides_track_position_not_index_parity() {
        // Index 2 of three leaves: even index, yet at level 1 the running
        // node sits at position 1 and its sibling is on the left.
        let hasher = Sha256Hasher;
        let tree = MerkleTree::new(&["a", "b", "c"]).expect("construction should succeed");

        let proof = tree.proof(2).expect("proof generation should succeed");

        let leaf_a = hasher.digest(b"a");
        let leaf_b = hasher.digest(b"b");
        let leaf_c = hasher.digest(b"c");
        assert_eq!(
            proof.steps,
            vec![
                // Unpaired leaf: its own digest stands in as the right sibling.
                ProofStep { digest: leaf_c, side: Side::Right },
                ProofStep { digest: hasher.hash_pair(&leaf_a, &leaf_b), side: Side::Left },
            ]
        );
        assert!(verify_proof(&hasher, b"c", &proof, &tree.root()));
    }

    #[test]
    fn test_duplicate_elements_prove_from_first_match() {
        let tree = MerkleTree::new(&["dup", "dup", "other"]).expect("construction should succeed");

        let proof =
            tree.proof_for_element(b"dup").expect("proof for a present element should succeed");
        let first = tree.proof(0).expect("proof generation should succeed");

        assert_eq!(proof, first);
        assert!(verify_proof(tree.hasher(), b"dup", &proof, &tree.root()));
    }
}
