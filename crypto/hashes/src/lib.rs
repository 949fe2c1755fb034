pub mod hasher;
pub mod merkle;

// Re-export commonly used types
pub use hasher::{double_sha256, HashWriter};
pub use merkle::{merkle_root, MerkleTree};

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HASH_SIZE: usize = 32;

/// A 32-byte digest stored in internal (little-endian) byte order.
///
/// `Display` and `FromStr` use the reversed, big-endian hex form block
/// explorers print, so `0000e314...` reads the same way it is written.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Hash([u8; HASH_SIZE]);

#[derive(Error, Debug, PartialEq)]
pub enum HashParseError {
    #[error("invalid hash length: expected 64 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl Hash {
    pub const ZERO: Hash = Hash([0u8; HASH_SIZE]);

    /// Wraps bytes already in internal order
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a hash from its display (big-endian) byte order. Usable in const
    /// contexts together with `hex_literal::hex!`.
    pub const fn from_be_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        let mut out = [0u8; HASH_SIZE];
        let mut i = 0;
        while i < HASH_SIZE {
            out[i] = bytes[HASH_SIZE - 1 - i];
            i += 1;
        }
        Self(out)
    }

    /// Returns raw bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Returns the bytes in display (big-endian) order
    pub fn to_be_bytes(&self) -> [u8; HASH_SIZE] {
        let mut out = self.0;
        out.reverse();
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(h: Hash) -> Self {
        h.0
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; HASH_SIZE] = slice.try_into()?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Hash {
    type Target = [u8; HASH_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_be_bytes()))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

impl FromStr for Hash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HASH_SIZE * 2 {
            return Err(HashParseError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_reversed() {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[0] = 0xab;
        let h = Hash::from_bytes(bytes);
        let s = h.to_string();
        assert!(s.ends_with("ab"));
        assert!(s.starts_with("00"));
    }

    #[test]
    fn parse_display_roundtrip() {
        let s = "0000e314b287500c1ab53d85a2b6f90df65f9dff17ead5e8fdad417ca47bcfd8";
        let h: Hash = s.parse().unwrap();
        assert_eq!(h.to_string(), s);
        assert_eq!(h.as_bytes()[31], 0x00);
        assert_eq!(h.as_bytes()[0], 0xd8);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("abcd".parse::<Hash>(), Err(HashParseError::InvalidLength(4)));
        let bad = "zz".repeat(32);
        assert!(matches!(bad.parse::<Hash>(), Err(HashParseError::InvalidHex(_))));
    }
}
