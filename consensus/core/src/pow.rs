//! Compact difficulty encoding and the proof-of-work predicate.

use primitive_types::U256;

use crate::Hash;

/// Expands compact `bits` into a 256-bit target.
///
/// Returns `None` for negative or overflowing encodings, which no valid
/// header may carry.
pub fn compact_to_target(bits: u32) -> Option<U256> {
    let exponent = (bits >> 24) as usize;
    let mantissa = bits & 0x007f_ffff;
    let negative = bits & 0x0080_0000 != 0;

    let target = if exponent <= 3 {
        U256::from(mantissa >> (8 * (3 - exponent)))
    } else {
        if mantissa != 0 && (exponent > 34 || (mantissa > 0xff && exponent > 33) || (mantissa > 0xffff && exponent > 32)) {
            return None;
        }
        U256::from(mantissa) << (8 * (exponent - 3))
    };

    if negative && !target.is_zero() {
        return None;
    }
    Some(target)
}

/// Compresses a target into its compact form, rounding down
pub fn target_to_compact(target: U256) -> u32 {
    let mut size = target.bits().div_ceil(8) as u32;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3) as usize)).low_u32()
    };
    // Keep the mantissa positive
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | (size << 24)
}

/// Reads a hash as a little-endian 256-bit integer
pub fn hash_to_u256(hash: &Hash) -> U256 {
    U256::from_little_endian(hash.as_bytes())
}

/// Checks that `hash` satisfies `bits` and that `bits` does not exceed `pow_limit`
pub fn check_proof_of_work(hash: &Hash, bits: u32, pow_limit: U256) -> bool {
    match compact_to_target(bits) {
        Some(target) if !target.is_zero() && target <= pow_limit => hash_to_u256(hash) <= target,
        _ => false,
    }
}
