//! Trie path prefixes and their canonical encoding
//!
//! A key's location in the trie is its hashed expansion: the 32-byte key
//! digest read as 256 path segments of one bit each, most significant bit
//! first. This module provides the prefix type those segments are walked
//! with and the canonical byte encoding that node addressing hashes.

use crate::types::Digest;

/// Number of path segments in a full leaf path
pub const PATH_BITS: u16 = 256;

/// A prefix of a key's hashed expansion
///
/// Holds up to 256 bits packed into 32 bytes, most significant bit first,
/// together with the number of meaningful bits. Bits beyond the length
/// are always zero, which makes [`TriePath::encode`] canonical: two
/// prefixes encode identically iff they are the same prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TriePath {
    bits: [u8; 32],
    len: u16,
}

impl TriePath {
    /// The zero-length prefix addressing the root node
    pub const EMPTY: TriePath = TriePath { bits: [0u8; 32], len: 0 };

    /// Builds the full leaf path from a key digest
    pub fn leaf(digest: Digest) -> Self {
        TriePath { bits: digest, len: PATH_BITS }
    }

    /// Returns the number of meaningful bits in this prefix.
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Returns whether this is the zero-length root prefix.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the bit value at the given depth (0-255)
    ///
    /// Depth 0 is the most significant bit of the first byte. Depths at
    /// or beyond the prefix length read as 0.
    ///
    /// # Arguments
    /// * `depth` - Which bit to extract
    ///
    /// # Returns
    /// The bit value (0 or 1) at the specified depth
    pub fn bit(&self, depth: u16) -> u8 {
        if depth >= self.len {
            return 0;
        }
        let byte_index = (depth / 8) as usize;
        let bit_index = depth % 8;
        (self.bits[byte_index] >> (7 - bit_index)) & 1
    }

    /// Returns the prefix consisting of the first `len` bits
    ///
    /// Trailing bits of a partial final byte are zeroed so the result
    /// upholds the canonical-encoding invariant. A `len` at or beyond
    /// this prefix's length returns the prefix unchanged.
    ///
    /// # Arguments
    /// * `len` - The number of leading bits to keep
    ///
    /// # Returns
    /// The truncated prefix
    pub fn prefix(&self, len: u16) -> TriePath {
        let keep = len.min(self.len);
        let mut bits = [0u8; 32];
        let full_bytes = (keep / 8) as usize;
        bits[..full_bytes].copy_from_slice(&self.bits[..full_bytes]);
        let remainder_bits = keep % 8;
        if remainder_bits > 0 {
            let mask = !((1u8 << (8 - remainder_bits)) - 1);
            bits[full_bytes] = self.bits[full_bytes] & mask;
        }
        TriePath { bits, len: keep }
    }

    /// Extends this prefix by one path segment
    ///
    /// A full-length path has no children and is returned unchanged.
    ///
    /// # Arguments
    /// * `bit` - The segment value; any nonzero value sets the bit
    ///
    /// # Returns
    /// The one-longer prefix
    pub fn child(&self, bit: u8) -> TriePath {
        if self.len >= PATH_BITS {
            return *self;
        }
        let mut next = *self;
        if bit != 0 {
            let byte_index = (next.len / 8) as usize;
            let bit_index = next.len % 8;
            next.bits[byte_index] |= 1 << (7 - bit_index);
        }
        next.len += 1;
        next
    }

    /// Returns the sibling prefix: the same bits with the last one flipped
    ///
    /// The root prefix has no sibling and is returned unchanged.
    pub fn sibling(&self) -> TriePath {
        if self.len == 0 {
            return *self;
        }
        let mut flipped = *self;
        let last = self.len - 1;
        let byte_index = (last / 8) as usize;
        let bit_index = last % 8;
        flipped.bits[byte_index] ^= 1 << (7 - bit_index);
        flipped
    }

    /// Encodes this prefix canonically for node addressing
    ///
    /// The encoding is the bit length as two big-endian bytes followed by
    /// the packed prefix bytes, `ceil(len / 8)` of them. The length tag
    /// keeps prefixes of different lengths distinct even when their packed
    /// bytes agree, and the trailing-bits-zero invariant keeps prefixes of
    /// equal length distinct exactly when their bits differ.
    ///
    /// # Returns
    /// The encoded prefix as a byte vector
    pub fn encode(&self) -> Vec<u8> {
        let prefix_bytes = (self.len as usize + 7) / 8;
        let mut encoded = Vec::with_capacity(2 + prefix_bytes);
        encoded.extend_from_slice(&self.len.to_be_bytes());
        encoded.extend_from_slice(&self.bits[..prefix_bytes]);
        encoded
    }
}
