//! Static Merkle tree over an ordered list of elements
//!
//! This module provides bottom-up construction of a binary hash tree,
//! O(1) root access, per-position membership proofs that record which
//! side each sibling occupies, and proof verification that replays the
//! aggregation from a single element.

mod proof;
mod tree;

pub use proof::{verify_proof, MerkleProof, ProofStep, Side};
pub use tree::{level_sizes, MerkleTree};
