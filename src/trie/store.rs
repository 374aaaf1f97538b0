//! Path-addressed node storage
//!
//! Trie nodes live in a keyed map whose key is the digest of a node's
//! canonical path encoding. The map is the sole access path to a node;
//! nothing holds a direct reference between nodes, so tree navigation is
//! always a derived-key lookup.

use std::collections::BTreeMap;

use super::node::TrieNode;
use super::path::TriePath;
use crate::hash::DigestHasher;
use crate::types::Digest;

/// Computes the storage key addressing the node at a path prefix
///
/// # Arguments
/// * `hasher` - The hash implementation
/// * `path` - The prefix to address
///
/// # Returns
/// The digest of the prefix's canonical encoding
pub fn node_key<H: DigestHasher>(hasher: &H, path: &TriePath) -> Digest {
    hasher.digest(&path.encode())
}

/// In-memory node map keyed by path digest
///
/// Owned outright by one trie instance; the single-writer model needs no
/// interior locking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMap {
    nodes: BTreeMap<Digest, TrieNode>,
}

impl NodeMap {
    /// Creates an empty node map.
    pub fn new() -> Self {
        NodeMap { nodes: BTreeMap::new() }
    }

    /// Looks up the node stored under a key.
    pub fn get(&self, key: &Digest) -> Option<&TrieNode> {
        self.nodes.get(key)
    }

    /// Stores a node under a key, returning the displaced node if any.
    pub fn insert(&mut self, key: Digest, node: TrieNode) -> Option<TrieNode> {
        self.nodes.insert(key, node)
    }

    /// Returns the number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether no nodes are stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256Hasher;

    #[test]
    fn test_node_keys_are_distinct_per_prefix() {
        let hasher = Sha256Hasher;
        let empty = node_key(&hasher, &TriePath::EMPTY);
        let zero = node_key(&hasher, &TriePath::EMPTY.child(0));
        let one = node_key(&hasher, &TriePath::EMPTY.child(1));
        let zero_zero = node_key(&hasher, &TriePath::EMPTY.child(0).child(0));

        assert_ne!(empty, zero);
        assert_ne!(zero, one);
        assert_ne!(zero, zero_zero);
    }

    #[test]
    fn test_insert_and_get() {
        let hasher = Sha256Hasher;
        let mut map = NodeMap::new();
        let path = TriePath::EMPTY.child(1);
        let key = node_key(&hasher, &path);

        assert!(map.is_empty());
        assert!(map.get(&key).is_none());

        let displaced = map.insert(key, TrieNode::leaf(path, b"first".to_vec()));

        assert!(displaced.is_none());
        assert_eq!(map.len(), 1);

        let overwritten = map.insert(key, TrieNode::leaf(path, b"second".to_vec()));

        assert_eq!(overwritten.map(|node| node.value), Some(b"first".to_vec()));
        assert_eq!(map.get(&key).map(|node| node.value.as_slice()), Some(&b"second"[..]));
        assert_eq!(map.len(), 1);
    }
}
