//! Hash-linked record ledger
//!
//! Append-only records, each committing to its parent by digest. The
//! ledger starts from a deterministic genesis record and admits forks;
//! the tip is the record with the latest timestamp, with earlier-appended
//! records winning ties.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::{LedgerError, Result};
use crate::hash::{DigestHasher, Sha256Hasher, DEFAULT_HASHER};
use crate::types::{digest_to_hex, Digest, DIGEST_LEN, ZERO_DIGEST};

/// A single ledger record
///
/// The digest commits to every other field, fixed-width fields first,
/// so two records differing in any field have different digests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Distance from genesis along the parent chain
    pub id: u64,
    /// Milliseconds since the Unix epoch
    pub timestamp_millis: u64,
    /// Opaque payload bytes
    pub payload: Vec<u8>,
    /// Digest of the parent record
    pub previous: Digest,
    /// Digest of this record
    pub digest: Digest,
}

impl Record {
    /// Computes the digest committing to a record's fields
    ///
    /// The preimage is `id` and `timestamp_millis` as big-endian bytes,
    /// then the parent digest, then the payload. The fixed-width fields
    /// lead so the variable-length payload cannot forge a field boundary.
    pub fn compute_digest<H: DigestHasher>(
        hasher: &H,
        id: u64,
        timestamp_millis: u64,
        previous: &Digest,
        payload: &[u8],
    ) -> Digest {
        let mut preimage = Vec::with_capacity(8 + 8 + DIGEST_LEN + payload.len());
        preimage.extend_from_slice(&id.to_be_bytes());
        preimage.extend_from_slice(&timestamp_millis.to_be_bytes());
        preimage.extend_from_slice(previous);
        preimage.extend_from_slice(payload);
        hasher.digest(&preimage)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {} {}", self.id, digest_to_hex(&self.digest))
    }
}

/// An append-only ledger of hash-linked records
///
/// Records are held in append order and indexed by digest. Every append
/// names its parent, so the ledger is a tree rooted at genesis; lineage
/// and tip queries resolve against the whole record set.
///
/// Single-writer by construction: appends take `&mut self`.
///
/// Generic over the hash implementation; [`Ledger::new`] uses SHA-256.
#[derive(Clone, Debug)]
pub struct Ledger<H = Sha256Hasher> {
    hasher: H,
    records: Vec<Record>,
    index: BTreeMap<Digest, usize>,
}

impl Ledger<Sha256Hasher> {
    /// Creates a SHA-256 ledger holding only the genesis record.
    pub fn new() -> Self {
        Self::with_hasher(DEFAULT_HASHER)
    }
}

impl Default for Ledger<Sha256Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DigestHasher> Ledger<H> {
    /// Creates a ledger with a custom hasher
    ///
    /// The genesis record has id 0, timestamp 0, an empty payload and an
    /// all-zero parent digest, so its digest is deterministic per hasher.
    pub fn with_hasher(hasher: H) -> Self {
        let digest = Record::compute_digest(&hasher, 0, 0, &ZERO_DIGEST, &[]);
        let genesis = Record {
            id: 0,
            timestamp_millis: 0,
            payload: Vec::new(),
            previous: ZERO_DIGEST,
            digest,
        };
        let mut index = BTreeMap::new();
        index.insert(digest, 0);
        Ledger { hasher, records: vec![genesis], index }
    }

    /// Appends a record carrying `payload` under the parent `previous`,
    /// timestamped with the current wall clock
    ///
    /// # Returns
    /// The new record's digest, or [`LedgerError::UnknownParent`] if no
    /// record with digest `previous` exists
    pub fn append(&mut self, payload: &[u8], previous: &Digest) -> Result<Digest> {
        self.append_at(payload, previous, now_millis())
    }

    /// Appends a record with an explicit timestamp
    ///
    /// The record's id is its parent's id plus one. Re-appending a
    /// record identical in every field is a no-op returning the digest
    /// already stored.
    ///
    /// # Arguments
    /// * `payload` - Opaque payload bytes
    /// * `previous` - Digest of the parent record
    /// * `timestamp_millis` - Milliseconds since the Unix epoch
    ///
    /// # Returns
    /// The new record's digest, or [`LedgerError::UnknownParent`] if no
    /// record with digest `previous` exists
    pub fn append_at(
        &mut self,
        payload: &[u8],
        previous: &Digest,
        timestamp_millis: u64,
    ) -> Result<Digest> {
        let parent_id = match self.index.get(previous) {
            Some(&position) => self.records[position].id,
            None => return Err(LedgerError::UnknownParent { previous: *previous }.into()),
        };

        let id = parent_id + 1;
        let digest = Record::compute_digest(&self.hasher, id, timestamp_millis, previous, payload);
        if self.index.contains_key(&digest) {
            return Ok(digest);
        }

        let record = Record {
            id,
            timestamp_millis,
            payload: payload.to_vec(),
            previous: *previous,
            digest,
        };
        self.index.insert(digest, self.records.len());
        self.records.push(record);
        Ok(digest)
    }

    /// Looks up a record by digest.
    pub fn get(&self, digest: &Digest) -> Option<&Record> {
        self.index.get(digest).map(|&position| &self.records[position])
    }

    /// Returns the genesis record's digest.
    pub fn genesis_digest(&self) -> Digest {
        self.records[0].digest
    }

    /// Returns the record with the latest timestamp
    ///
    /// Ties go to the record appended first. A fresh ledger's tip is the
    /// genesis record.
    pub fn tip(&self) -> &Record {
        let mut tip = &self.records[0];
        for record in &self.records[1..] {
            if record.timestamp_millis > tip.timestamp_millis {
                tip = record;
            }
        }
        tip
    }

    /// Returns the tip's lineage, genesis first
    ///
    /// Walks parent digests from the tip back to genesis; records on
    /// other forks are not included.
    pub fn chain(&self) -> Vec<&Record> {
        let mut lineage = Vec::new();
        let mut current = Some(self.tip());
        while let Some(record) = current {
            lineage.push(record);
            current = if record.id == 0 {
                None
            } else {
                self.index.get(&record.previous).map(|&position| &self.records[position])
            };
        }
        lineage.reverse();
        lineage
    }

    /// Returns the number of records, genesis included.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the hash implementation this ledger commits with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::hash::Keccak256Hasher;

    #[test]
    fn test_genesis_record() {
        let ledger = Ledger::new();

        let genesis = ledger.get(&ledger.genesis_digest()).expect("genesis should be stored");

        assert_eq!(genesis.id, 0);
        assert_eq!(genesis.timestamp_millis, 0);
        assert!(genesis.payload.is_empty());
        assert_eq!(genesis.previous, ZERO_DIGEST);
        assert_eq!(
            genesis.digest,
            Record::compute_digest(ledger.hasher(), 0, 0, &ZERO_DIGEST, &[])
        );
        assert_eq!(ledger.record_count(), 1);
        assert_eq!(ledger.tip().id, 0);
    }

    #[test]
    fn test_append_links_records() {
        let mut ledger = Ledger::new();

        let first = ledger
            .append_at(b"first", &ledger.genesis_digest(), 100)
            .expect("append under genesis should succeed");
        let second =
            ledger.append_at(b"second", &first, 200).expect("append under tip should succeed");

        let record = ledger.get(&second).expect("appended record should be stored");
        assert_eq!(record.id, 2);
        assert_eq!(record.previous, first);
        assert_eq!(record.payload, b"second");
        assert_eq!(ledger.record_count(), 3);

        let lineage = ledger.chain();
        assert_eq!(
            lineage.iter().map(|record| record.digest).collect::<Vec<_>>(),
            vec![ledger.genesis_digest(), first, second]
        );
        assert_eq!(lineage[0].id, 0);
    }

    #[test]
    fn test_tip_prefers_latest_timestamp() {
        let mut ledger = Ledger::new();
        let genesis = ledger.genesis_digest();

        let slow_fork =
            ledger.append_at(b"slow", &genesis, 500).expect("append under genesis should succeed");
        let fast_fork =
            ledger.append_at(b"fast", &genesis, 900).expect("append under genesis should succeed");

        assert_eq!(ledger.tip().digest, fast_fork);

        // Extending the slow fork past the fast one moves the tip over.
        let slow_child = ledger
            .append_at(b"catch-up", &slow_fork, 1000)
            .expect("append under fork should succeed");
        assert_eq!(ledger.tip().digest, slow_child);
        assert_eq!(
            ledger.chain().iter().map(|record| record.digest).collect::<Vec<_>>(),
            vec![genesis, slow_fork, slow_child]
        );
        assert!(!ledger.chain().iter().any(|record| record.digest == fast_fork));
    }

    #[test]
    fn test_tip_tie_goes_to_first_appended() {
        let mut ledger = Ledger::new();
        let genesis = ledger.genesis_digest();

        let first =
            ledger.append_at(b"first", &genesis, 700).expect("append under genesis should succeed");
        ledger.append_at(b"second", &genesis, 700).expect("append under genesis should succeed");

        assert_eq!(ledger.tip().digest, first);
    }

    #[test]
    fn test_append_unknown_parent() {
        let mut ledger = Ledger::new();
        let missing = [0xabu8; DIGEST_LEN];

        let result = ledger.append_at(b"orphan", &missing, 100);

        assert_eq!(
            result,
            Err(Error::Ledger(LedgerError::UnknownParent { previous: missing }))
        );
        assert_eq!(ledger.record_count(), 1);
        let message = LedgerError::UnknownParent { previous: missing }.to_string();
        assert!(message.contains(&digest_to_hex(&missing)));
    }

    #[test]
    fn test_identical_append_is_idempotent() {
        let mut ledger = Ledger::new();
        let genesis = ledger.genesis_digest();

        let first =
            ledger.append_at(b"same", &genesis, 42).expect("append under genesis should succeed");
        let second =
            ledger.append_at(b"same", &genesis, 42).expect("repeat append should succeed");

        assert_eq!(first, second);
        assert_eq!(ledger.record_count(), 2);
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        let mut ledger = Ledger::new();
        let digest = ledger
            .append_at(b"shown", &ledger.genesis_digest(), 5)
            .expect("append under genesis should succeed");
        let record = ledger.get(&digest).expect("appended record should be stored");

        let rendered = record.to_string();

        assert!(rendered.starts_with("record 1 "));
        assert!(rendered.ends_with(&digest_to_hex(&digest)));
        assert_eq!(rendered.to_lowercase(), rendered);
    }

    #[test]
    fn test_hasher_swap_changes_genesis() {
        let sha_ledger = Ledger::new();
        let keccak_ledger = Ledger::with_hasher(Keccak256Hasher);

        assert_ne!(sha_ledger.genesis_digest(), keccak_ledger.genesis_digest());
    }
}
