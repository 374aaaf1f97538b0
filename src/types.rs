//! Core type definitions for the Merkle Attest library
//!
//! This module defines fundamental types used across multiple modules,
//! providing a common location for shared type definitions.

// ============================================================================
// Fundamental Types
// ============================================================================

/// Type alias for the 32-byte output of the hash capability
///
/// Every digest in the library is this fixed-length value: Merkle tree
/// nodes, trie node addresses, trie branch digests, and ledger record
/// digests. Equality is byte-wise.
pub type Digest = [u8; 32];

/// Length of a [`Digest`] in bytes
pub const DIGEST_LEN: usize = 32;

/// The all-zero digest
///
/// Used as the predecessor of a ledger genesis record. It is not a valid
/// output of any hash computation in practice and never collides with a
/// stored record digest.
pub const ZERO_DIGEST: Digest = [0u8; 32];

// ============================================================================
// Display
// ============================================================================

/// Renders a digest as a lowercase hex string with no prefix
///
/// All digest display in this library goes through this helper so that
/// rendered digests compare equal across implementations and test suites.
pub fn digest_to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_to_hex_is_lowercase_and_unprefixed() {
        let mut digest = ZERO_DIGEST;
        digest[0] = 0xAB;
        digest[31] = 0xCD;

        let rendered = digest_to_hex(&digest);

        assert_eq!(rendered.len(), 64);
        assert!(rendered.starts_with("ab"));
        assert!(rendered.ends_with("cd"));
        assert_eq!(rendered, rendered.to_lowercase());
    }
}
