#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Merkle Attest
//!
//! A Rust library of hash-authenticated data structures: Merkle trees
//! with membership proofs, an authenticated key-value trie, and a
//! hash-linked record ledger, all over one swappable digest capability.

// Error types for every fallible operation
pub mod errors;

// The digest capability and its hash backends
pub mod hash;

// Hash-linked record ledger with latest-timestamp tip selection
pub mod ledger;

// Merkle trees and membership proof verification
pub mod merkle;

// Plain character prefix tree
pub mod prefix;

// Authenticated key-value trie and value-at-key proofs
pub mod trie;

// Shared digest type and helpers
pub mod types;

// Re-export commonly used types and functions
pub use errors::{Error, LedgerError, MerkleError, Result, TrieError};
pub use hash::{DigestHasher, Keccak256Hasher, Sha256Hasher};
pub use ledger::{Ledger, Record};
pub use merkle::{verify_proof, MerkleProof, MerkleTree, ProofStep, Side};
pub use prefix::PrefixTree;
pub use trie::{verify_trie_proof, AuthenticatedTrie, NodeKind, TrieNode, TriePath, TrieProof};
pub use types::{digest_to_hex, Digest, DIGEST_LEN, ZERO_DIGEST};
