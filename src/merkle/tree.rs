//! Merkle tree construction and queries

use super::proof::{verify_proof, MerkleProof, ProofStep, Side};
use crate::errors::{MerkleError, Result};
use crate::hash::{DigestHasher, Sha256Hasher, DEFAULT_HASHER};
use crate::types::Digest;

/// Computes the level sizes of a Merkle tree with the given leaf count
///
/// Level 0 holds one digest per leaf; each later level holds half the
/// previous level rounded up, ending at the single-entry root level. A
/// zero leaf count yields an empty sequence (no tree exists for it).
///
/// # Arguments
/// * `leaf_count` - The number of leaves
///
/// # Returns
/// The sequence of level sizes, largest first
///
/// # Example
///
/// ```rust
/// use merkle_attest::merkle::level_sizes;
///
/// assert_eq!(level_sizes(3), vec![3, 2, 1]);
/// assert_eq!(level_sizes(1), vec![1]);
/// assert_eq!(level_sizes(0), Vec::<usize>::new());
/// ```
pub fn level_sizes(leaf_count: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut width = leaf_count;
    while width > 0 {
        sizes.push(width);
        if width == 1 {
            break;
        }
        width = (width + 1) / 2;
    }
    sizes
}

/// A static Merkle tree committing to an ordered list of elements
///
/// The tree is built once at construction and never mutated; committing
/// to a changed list means building a fresh tree. Leaf digests sit at
/// level 0 and each upper level pairs the level below left-before-right,
/// where a trailing unpaired digest is combined with itself.
///
/// The tree is generic over the hash implementation; [`MerkleTree::new`]
/// uses SHA-256.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree<H = Sha256Hasher> {
    hasher: H,
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree<Sha256Hasher> {
    /// Builds a SHA-256 Merkle tree over the given elements
    ///
    /// # Arguments
    /// * `elements` - The ordered elements to commit to, at least one
    ///
    /// # Returns
    /// The constructed tree, or [`MerkleError::EmptyElements`] for an
    /// empty list
    ///
    /// # Example
    ///
    /// ```rust
    /// use merkle_attest::merkle::MerkleTree;
    ///
    /// let tree = MerkleTree::new(&["a", "b", "c"])?;
    /// assert_eq!(tree.leaf_count(), 3);
    /// # Ok::<(), merkle_attest::errors::Error>(())
    /// ```
    pub fn new<T: AsRef<[u8]>>(elements: &[T]) -> Result<Self> {
        Self::with_hasher(DEFAULT_HASHER, elements)
    }
}

impl<H: DigestHasher> MerkleTree<H> {
    /// Builds a Merkle tree over the given elements with a custom hasher
    ///
    /// # Arguments
    /// * `hasher` - The hash implementation to aggregate with
    /// * `elements` - The ordered elements to commit to, at least one
    ///
    /// # Returns
    /// The constructed tree, or [`MerkleError::EmptyElements`] for an
    /// empty list
    pub fn with_hasher<T: AsRef<[u8]>>(hasher: H, elements: &[T]) -> Result<Self> {
        if elements.is_empty() {
            return Err(MerkleError::EmptyElements.into());
        }

        let leaves: Vec<Digest> =
            elements.iter().map(|element| hasher.digest(element.as_ref())).collect();
        let mut levels = vec![leaves];

        loop {
            let parents = {
                let level = &levels[levels.len() - 1];
                if level.len() == 1 {
                    break;
                }
                let mut parents = Vec::with_capacity((level.len() + 1) / 2);
                for pair in level.chunks(2) {
                    let left = pair[0];
                    // A trailing unpaired digest is its own right sibling.
                    let right = if pair.len() == 2 { pair[1] } else { left };
                    parents.push(hasher.hash_pair(&left, &right));
                }
                parents
            };
            levels.push(parents);
        }

        Ok(MerkleTree { hasher, levels })
    }

    /// Returns the root digest. O(1): the root is stored, never recomputed.
    pub fn root(&self) -> Digest {
        self.levels[self.levels.len() - 1][0]
    }

    /// Returns the number of committed elements.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Returns the size of each level, leaf level first.
    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    /// Returns the hash implementation this tree aggregates with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Generates a membership proof for the leaf at the given index
    ///
    /// The proof holds one step per level below the root. Each step
    /// records the sibling digest to combine with at that level and the
    /// side that sibling occupies, so the verifier concatenates in the
    /// order the tree was built with. An unpaired trailing node records
    /// its own digest on the right, matching the construction rule.
    ///
    /// # Arguments
    /// * `index` - The leaf position, `0 <= index < leaf_count`
    ///
    /// # Returns
    /// The proof, or [`MerkleError::IndexOutOfRange`] for a bad index
    pub fn proof(&self, index: usize) -> Result<MerkleProof> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange { index, leaf_count }.into());
        }

        let mut steps = Vec::with_capacity(self.levels.len() - 1);
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_position = position ^ 1;
            let step = if sibling_position < level.len() {
                let side = if sibling_position < position { Side::Left } else { Side::Right };
                ProofStep { digest: level[sibling_position], side }
            } else {
                // Unpaired node: its duplicate-self copy acts as the right sibling.
                ProofStep { digest: level[position], side: Side::Right }
            };
            steps.push(step);
            position /= 2;
        }

        Ok(MerkleProof { steps })
    }

    /// Generates a membership proof for the first leaf matching an element
    ///
    /// Scans the leaf level for the element's digest (O(n)); duplicates
    /// resolve to the earliest position.
    ///
    /// # Arguments
    /// * `element` - The element bytes to locate
    ///
    /// # Returns
    /// The proof, or [`MerkleError::ElementNotFound`] if no leaf matches
    pub fn proof_for_element(&self, element: &[u8]) -> Result<MerkleProof> {
        let leaf = self.hasher.digest(element);
        let index = self.levels[0]
            .iter()
            .position(|stored| *stored == leaf)
            .ok_or(MerkleError::ElementNotFound)?;
        self.proof(index)
    }

    /// Checks whether an element is committed to by this tree
    ///
    /// Locates the element's leaf, generates its proof internally, and
    /// verifies the proof against the stored root. Absent elements yield
    /// `false`, never an error.
    pub fn contains(&self, element: &[u8]) -> bool {
        match self.proof_for_element(element) {
            Ok(proof) => verify_proof(&self.hasher, element, &proof, &self.root()),
            Err(_) => false,
        }
    }
}
