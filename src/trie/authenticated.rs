//! Authenticated key-value trie with incremental root maintenance

use super::node::{NodeKind, TrieNode};
use super::path::{TriePath, PATH_BITS};
use super::store::{node_key, NodeMap};
use crate::errors::{Result, TrieError};
use crate::hash::{DigestHasher, Sha256Hasher, DEFAULT_HASHER};
use crate::types::Digest;

/// A value-at-key proof: one sibling branch digest per path segment
///
/// Siblings are ordered root level first, so `siblings[d]` is the branch
/// not taken at depth `d` of the key's path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieProof {
    /// The sibling branch digests, root level first
    pub siblings: Vec<Digest>,
}

/// An authenticated mapping from opaque keys to opaque values
///
/// Each key's value lives in a leaf addressed by the key's hashed
/// expansion; every prefix of that expansion owns an internal node whose
/// digest combines its two branches. Upserting a key rewrites the leaf
/// and every ancestor digest up to the root before returning, so the
/// root always commits to the current value of every stored key.
///
/// The trie is single-writer by construction: mutation takes `&mut self`
/// and readers see only fully propagated states. One instance owns its
/// node map outright; nodes are never shared between instances.
///
/// Generic over the hash implementation; [`AuthenticatedTrie::new`] uses
/// SHA-256.
#[derive(Clone, Debug)]
pub struct AuthenticatedTrie<H = Sha256Hasher> {
    hasher: H,
    nodes: NodeMap,
    cached_root: Option<Digest>,
}

impl AuthenticatedTrie<Sha256Hasher> {
    /// Creates an empty SHA-256 trie.
    pub fn new() -> Self {
        Self::with_hasher(DEFAULT_HASHER)
    }
}

impl Default for AuthenticatedTrie<Sha256Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DigestHasher> AuthenticatedTrie<H> {
    /// Creates an empty trie aggregating with a custom hasher
    ///
    /// The fresh trie holds one empty node at the root prefix; its root
    /// digest is the empty sentinel until the first write.
    pub fn with_hasher(hasher: H) -> Self {
        let mut nodes = NodeMap::new();
        let root_key = node_key(&hasher, &TriePath::EMPTY);
        nodes.insert(root_key, TrieNode::empty(TriePath::EMPTY));
        AuthenticatedTrie { hasher, nodes, cached_root: None }
    }

    /// Inserts a value for a key, or overwrites the key's current value
    ///
    /// Writes the leaf at the key's full hashed path, then recomputes
    /// every ancestor prefix deepest first: the branch just recomputed
    /// contributes its fresh digest, the branch not taken contributes its
    /// stored digest or the empty sentinel if nothing is stored there,
    /// and the two are pair-hashed left branch before right branch. The
    /// walk always reaches the root prefix, so the call never returns
    /// with partially propagated ancestors.
    ///
    /// # Arguments
    /// * `key` - The key bytes
    /// * `value` - The value bytes to store
    ///
    /// # Returns
    /// The new root digest
    pub fn insert_or_update(&mut self, key: &[u8], value: &[u8]) -> Digest {
        let leaf_path = TriePath::leaf(self.hasher.digest(key));
        let leaf = TrieNode::leaf(leaf_path, value.to_vec());
        let mut current = leaf.digest(&self.hasher);
        self.nodes.insert(node_key(&self.hasher, &leaf_path), leaf);

        for depth in (0..PATH_BITS).rev() {
            let prefix = leaf_path.prefix(depth);
            let sibling = self.branch_digest(&leaf_path.prefix(depth + 1).sibling());
            let (left, right) = if leaf_path.bit(depth) == 0 {
                (current, sibling)
            } else {
                (sibling, current)
            };
            current = self.hasher.hash_pair(&left, &right);
            self.nodes.insert(node_key(&self.hasher, &prefix), TrieNode::internal(prefix, current));
        }

        self.cached_root = Some(current);
        current
    }

    /// Returns the current root digest
    ///
    /// Reads the cache maintained by [`insert_or_update`] when present;
    /// otherwise reads the stored root node, which for an untouched trie
    /// is the empty sentinel.
    ///
    /// [`insert_or_update`]: AuthenticatedTrie::insert_or_update
    pub fn compute_root(&self) -> Digest {
        match self.cached_root {
            Some(root) => root,
            None => self.branch_digest(&TriePath::EMPTY),
        }
    }

    /// Checks a key's stored value against an expected value
    ///
    /// Looks up the leaf at the key's hashed path in this trie's own
    /// node map and byte-compares its value. No sibling digests are
    /// consulted; this authenticates against the trie's in-memory state,
    /// not an external root. Absent keys yield `false`, never an error.
    ///
    /// # Arguments
    /// * `key` - The key bytes
    /// * `value` - The expected value bytes
    ///
    /// # Returns
    /// Whether a leaf exists for the key and holds exactly `value`
    pub fn verify_address(&self, key: &[u8], value: &[u8]) -> bool {
        let leaf_path = TriePath::leaf(self.hasher.digest(key));
        match self.nodes.get(&node_key(&self.hasher, &leaf_path)) {
            Some(node) => node.kind == NodeKind::Leaf && node.value == value,
            None => false,
        }
    }

    /// Returns the value stored for a key
    ///
    /// # Arguments
    /// * `key` - The key bytes
    ///
    /// # Returns
    /// The stored value bytes, or [`TrieError::KeyNotFound`] if no leaf
    /// exists for the key
    pub fn get(&self, key: &[u8]) -> Result<&[u8]> {
        let path_digest = self.hasher.digest(key);
        let leaf_path = TriePath::leaf(path_digest);
        match self.nodes.get(&node_key(&self.hasher, &leaf_path)) {
            Some(node) if node.kind == NodeKind::Leaf => Ok(node.value.as_slice()),
            _ => Err(TrieError::KeyNotFound { path: path_digest }.into()),
        }
    }

    /// Generates a value-at-key proof for a stored key
    ///
    /// Collects the branch digest not taken at every depth of the key's
    /// path, root level first. Together with the key and its value the
    /// siblings let [`verify_trie_proof`] recompute the root without any
    /// access to this trie.
    ///
    /// # Arguments
    /// * `key` - The key bytes
    ///
    /// # Returns
    /// The proof, or [`TrieError::KeyNotFound`] if no leaf exists for
    /// the key
    pub fn prove(&self, key: &[u8]) -> Result<TrieProof> {
        let path_digest = self.hasher.digest(key);
        let leaf_path = TriePath::leaf(path_digest);
        let stored = self.nodes.get(&node_key(&self.hasher, &leaf_path));
        if !matches!(stored, Some(node) if node.kind == NodeKind::Leaf) {
            return Err(TrieError::KeyNotFound { path: path_digest }.into());
        }

        let mut siblings = Vec::with_capacity(PATH_BITS as usize);
        for depth in 0..PATH_BITS {
            siblings.push(self.branch_digest(&leaf_path.prefix(depth + 1).sibling()));
        }
        Ok(TrieProof { siblings })
    }

    /// Looks up the node stored at a path prefix.
    pub fn node(&self, path: &TriePath) -> Option<&TrieNode> {
        self.nodes.get(&node_key(&self.hasher, path))
    }

    /// Returns the number of stored nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the hash implementation this trie aggregates with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The digest a branch contributes to its parent: the stored node's
    /// digest, or the empty sentinel when nothing is stored there.
    fn branch_digest(&self, prefix: &TriePath) -> Digest {
        match self.nodes.get(&node_key(&self.hasher, prefix)) {
            Some(node) => node.digest(&self.hasher),
            None => self.hasher.empty_digest(),
        }
    }
}

/// Verifies a value-at-key proof against an expected root
///
/// Recomputes the leaf digest from the key's path and the claimed value,
/// then folds the sibling branches deepest first, ordering each pair by
/// the path bit at that depth. The proof is valid iff the final digest
/// equals the expected root. Malformed or mismatched proofs yield
/// `false`, never an error.
///
/// # Arguments
/// * `hasher` - The hash implementation the trie aggregates with
/// * `key` - The key bytes
/// * `value` - The claimed value bytes
/// * `proof` - The sibling branches along the key's path
/// * `root` - The expected root digest
///
/// # Returns
/// Whether replaying the aggregation reproduces `root`
pub fn verify_trie_proof<H: DigestHasher>(
    hasher: &H,
    key: &[u8],
    value: &[u8],
    proof: &TrieProof,
    root: &Digest,
) -> bool {
    if proof.siblings.len() != PATH_BITS as usize {
        return false;
    }

    let leaf_path = TriePath::leaf(hasher.digest(key));
    let mut current = TrieNode::leaf_digest(hasher, &leaf_path, value);
    for depth in (0..PATH_BITS).rev() {
        let sibling = proof.siblings[depth as usize];
        current = if leaf_path.bit(depth) == 0 {
            hasher.hash_pair(&current, &sibling)
        } else {
            hasher.hash_pair(&sibling, &current)
        };
    }
    current == *root
}
