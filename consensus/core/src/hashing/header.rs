use crate::header::Header;
use crate::Hash;

/// Computes the hash of a block header: SHA256d over its 80-byte serialization
pub fn hash(header: &Header) -> Hash {
    super::double_sha256(&header.serialize())
}
