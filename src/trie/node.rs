//! Trie node representation and node digests

use super::path::TriePath;
use crate::hash::DigestHasher;
use crate::types::{Digest, DIGEST_LEN};

/// The role a trie node plays at its path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A placeholder with no content; only the untouched root is ever one
    Empty,
    /// An aggregation node whose value is the digest of its two branches
    Internal,
    /// A node holding the caller's raw value bytes for one key
    Leaf,
}

/// A node in the authenticated trie
///
/// Nodes carry their full path from the root so a stored node is
/// self-describing; parent and child relations are never stored, they
/// are derived from path prefixes. A leaf's value is the caller's bytes;
/// an internal node's value is its 32-byte branch digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieNode {
    /// The node's full path from the root
    pub path: TriePath,
    /// The role this node plays
    pub kind: NodeKind,
    /// The payload: raw value bytes for a leaf, a digest for an internal
    /// node, empty for an empty node
    pub value: Vec<u8>,
}

impl TrieNode {
    /// Builds the placeholder node for an untouched prefix.
    pub fn empty(path: TriePath) -> Self {
        TrieNode { path, kind: NodeKind::Empty, value: Vec::new() }
    }

    /// Builds a leaf node holding the caller's value bytes.
    pub fn leaf(path: TriePath, value: Vec<u8>) -> Self {
        TrieNode { path, kind: NodeKind::Leaf, value }
    }

    /// Builds an internal node from its recomputed branch digest.
    pub fn internal(path: TriePath, digest: Digest) -> Self {
        TrieNode { path, kind: NodeKind::Internal, value: digest.to_vec() }
    }

    /// Computes the digest a leaf at `path` holding `value` contributes
    ///
    /// The preimage is the canonical path encoding followed by the value
    /// bytes, binding the leaf's content to its position. This is the one
    /// definition of a leaf digest; insertion and proof verification both
    /// call it.
    ///
    /// # Arguments
    /// * `hasher` - The hash implementation
    /// * `path` - The leaf's full path
    /// * `value` - The stored value bytes
    ///
    /// # Returns
    /// The leaf digest
    pub fn leaf_digest<H: DigestHasher>(hasher: &H, path: &TriePath, value: &[u8]) -> Digest {
        let mut preimage = path.encode();
        preimage.extend_from_slice(value);
        hasher.digest(&preimage)
    }

    /// Returns the digest this node contributes to its parent's branch
    ///
    /// An empty node contributes the empty sentinel, an internal node its
    /// stored branch digest, and a leaf its position-bound value digest.
    pub fn digest<H: DigestHasher>(&self, hasher: &H) -> Digest {
        match self.kind {
            NodeKind::Empty => hasher.empty_digest(),
            NodeKind::Internal => {
                let mut digest = [0u8; DIGEST_LEN];
                let len = self.value.len().min(DIGEST_LEN);
                digest[..len].copy_from_slice(&self.value[..len]);
                digest
            }
            NodeKind::Leaf => Self::leaf_digest(hasher, &self.path, &self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256Hasher;

    #[test]
    fn test_empty_node_digest_is_sentinel() {
        let hasher = Sha256Hasher;
        let node = TrieNode::empty(TriePath::EMPTY);

        assert_eq!(node.digest(&hasher), hasher.empty_digest());
    }

    #[test]
    fn test_internal_node_digest_is_stored_value() {
        let hasher = Sha256Hasher;
        let branch_digest = [42u8; 32];
        let node = TrieNode::internal(TriePath::EMPTY.child(1), branch_digest);

        assert_eq!(node.digest(&hasher), branch_digest);
    }

    #[test]
    fn test_leaf_digest_binds_path_and_value() {
        let hasher = Sha256Hasher;
        let path = TriePath::leaf([5u8; 32]);
        let node = TrieNode::leaf(path, b"value".to_vec());

        let mut preimage = path.encode();
        preimage.extend_from_slice(b"value");

        assert_eq!(node.digest(&hasher), hasher.digest(&preimage));

        // Same value at a different path contributes a different digest.
        let other_path = TriePath::leaf([6u8; 32]);
        let other = TrieNode::leaf(other_path, b"value".to_vec());

        assert_ne!(node.digest(&hasher), other.digest(&hasher));
    }
}
