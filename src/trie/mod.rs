//! Authenticated key-value trie
//!
//! Keys are expanded into fixed-length hashed paths; every path prefix
//! owns a node in a flat, digest-addressed map. [`AuthenticatedTrie`]
//! maintains the aggregated root across upserts, and
//! [`verify_trie_proof`] replays a sibling-path proof against a root
//! with no access to the trie itself.

mod authenticated;
mod node;
mod path;
mod store;

pub use authenticated::{verify_trie_proof, AuthenticatedTrie, TrieProof};
pub use node::{NodeKind, TrieNode};
pub use path::{TriePath, PATH_BITS};
pub use store::{node_key, NodeMap};
