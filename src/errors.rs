//! Error types for the Merkle Attest library
//!
//! This module defines all error types used throughout the library,
//! providing detailed error information for debugging and handling.
//!
//! Absence is only an error where an operation has no meaningful result
//! without the thing looked up (proof generation, value retrieval, ledger
//! parent resolution). Existence and verification queries report absence
//! as a `false` result instead and never construct these types.

use thiserror::Error;

use crate::types::Digest;

/// The main error type for the Merkle Attest library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Merkle tree errors
    #[error(transparent)]
    Merkle(#[from] MerkleError),

    /// Authenticated trie errors
    #[error(transparent)]
    Trie(#[from] TrieError),

    /// Ledger errors
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur during Merkle tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MerkleError {
    /// Construction was given no elements to commit to
    #[error("Cannot build a Merkle tree from an empty element list")]
    EmptyElements,

    /// A proof was requested for a leaf position outside the tree
    #[error("Leaf index {index} is out of range for a tree with {leaf_count} leaves")]
    IndexOutOfRange {
        /// The requested leaf index
        index: usize,
        /// The number of leaves in the tree
        leaf_count: usize,
    },

    /// A proof was requested for an element absent from the tree
    #[error("Element is not present in the tree")]
    ElementNotFound,
}

/// Errors that can occur during authenticated trie operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrieError {
    /// No leaf is stored for the requested key
    #[error("No value stored at leaf path {}", hex::encode(.path))]
    KeyNotFound {
        /// Digest of the key, i.e. the full leaf path that was probed
        path: Digest,
    },
}

/// Errors that can occur during ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerError {
    /// The named predecessor record is not part of the ledger
    #[error("Unknown predecessor record {}", hex::encode(.previous))]
    UnknownParent {
        /// Digest of the missing predecessor record
        previous: Digest,
    },
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
