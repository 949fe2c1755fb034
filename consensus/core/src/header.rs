use serde::{Deserialize, Serialize};

use crate::hashing;
use crate::Hash;

/// Serialized size of a block header in bytes
pub const HEADER_SIZE: usize = 80;

/// @category Consensus
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Cached hash
    pub hash: Hash,
    pub version: i32,
    pub prev_block_hash: Hash,
    pub hash_merkle_root: Hash,
    /// Seconds since the Unix epoch
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn new_finalized(
        version: i32,
        prev_block_hash: Hash,
        hash_merkle_root: Hash,
        timestamp: u32,
        bits: u32,
        nonce: u32,
    ) -> Self {
        let mut header = Self { hash: Hash::ZERO, version, prev_block_hash, hash_merkle_root, timestamp, bits, nonce };
        header.finalize();
        header
    }

    /// Re-computes the cached hash after a field change
    pub fn finalize(&mut self) {
        self.hash = hashing::header::hash(self);
    }

    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..68].copy_from_slice(self.hash_merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.timestamp.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }
}
