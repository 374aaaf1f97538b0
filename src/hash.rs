//! The hash capability every structure in this library builds on
//!
//! This module defines the [`DigestHasher`] trait, the single seam through
//! which all digest computation flows, together with the provided SHA-256
//! and Keccak-256 implementations. Swapping the cryptographic primitive is
//! a type-parameter change at a structure's construction site; none of the
//! aggregation logic needs to be touched.

use sha2::{Digest as _, Sha256};
use sha3::Keccak256;

use crate::types::{Digest, DIGEST_LEN};

/// Trait for hash functions used by the Merkle tree, the authenticated
/// trie, and the ledger
///
/// The required [`digest`](DigestHasher::digest) method is the one
/// authoritative hash call site. The provided methods define the two
/// compositions shared by every structure: pair combination for internal
/// nodes and the sentinel digest for absent branches. Implementations must
/// be deterministic and total over all byte sequences, including empty
/// input.
///
/// # Example
///
/// ```rust
/// use merkle_attest::hash::DigestHasher;
/// use merkle_attest::types::Digest;
///
/// struct XorHasher;
///
/// impl DigestHasher for XorHasher {
///     fn digest(&self, bytes: &[u8]) -> Digest {
///         let mut digest = [0u8; 32];
///         for (i, byte) in bytes.iter().enumerate() {
///             digest[i % 32] ^= byte;
///         }
///         digest
///     }
/// }
///
/// let hasher = XorHasher;
/// assert_eq!(hasher.empty_digest(), [0u8; 32]);
/// ```
pub trait DigestHasher {
    /// Hashes an arbitrary byte sequence into a fixed-length digest
    ///
    /// # Arguments
    /// * `bytes` - The input bytes (may be empty)
    ///
    /// # Returns
    /// The 32-byte digest of the input
    fn digest(&self, bytes: &[u8]) -> Digest;

    /// Combines two child digests into their parent digest
    ///
    /// The parent is the digest of the left child's bytes immediately
    /// followed by the right child's bytes. Concatenation order matters:
    /// every aggregation and every proof verification in this library use
    /// this same left-before-right rule.
    ///
    /// # Arguments
    /// * `left` - The left child digest
    /// * `right` - The right child digest
    ///
    /// # Returns
    /// The parent digest
    fn hash_pair(&self, left: &Digest, right: &Digest) -> Digest {
        let mut preimage = [0u8; DIGEST_LEN * 2];
        preimage[..DIGEST_LEN].copy_from_slice(left);
        preimage[DIGEST_LEN..].copy_from_slice(right);
        self.digest(&preimage)
    }

    /// Returns the digest of the empty byte sequence
    ///
    /// This is the sentinel contributed by an absent branch when the
    /// authenticated trie aggregates a node with fewer than two children.
    ///
    /// # Returns
    /// The 32-byte digest of zero input bytes
    fn empty_digest(&self) -> Digest {
        self.digest(&[])
    }
}

/// SHA-256 implementation of [`DigestHasher`]
///
/// This is the default hasher for every structure in the library.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl DigestHasher for Sha256Hasher {
    fn digest(&self, bytes: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hasher.finalize().into()
    }
}

/// Keccak-256 implementation of [`DigestHasher`]
///
/// Provided for callers that need Ethereum-style digests; behaviorally
/// interchangeable with [`Sha256Hasher`] everywhere in the library.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256Hasher;

impl DigestHasher for Keccak256Hasher {
    fn digest(&self, bytes: &[u8]) -> Digest {
        let mut hasher = Keccak256::new();
        hasher.update(bytes);
        hasher.finalize().into()
    }
}

/// Default hasher instance (SHA-256)
pub(crate) const DEFAULT_HASHER: Sha256Hasher = Sha256Hasher;
