use serde::{Deserialize, Serialize};

/// Script opcodes used when assembling genesis and template scripts
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    OP_0 = 0x00,
    OP_PUSHDATA1 = 0x4c,
    OP_PUSHDATA2 = 0x4d,
    OP_PUSHDATA4 = 0x4e,
    OP_1NEGATE = 0x4f,
    OP_1 = 0x51,
    OP_16 = 0x60,
    OP_RETURN = 0x6a,
    OP_DUP = 0x76,
    OP_EQUAL = 0x87,
    OP_EQUALVERIFY = 0x88,
    OP_HASH160 = 0xa9,
    OP_CHECKSIG = 0xac,
    OP_CHECKMULTISIG = 0xae,
}

/// Raw script bytes with a small append-only builder API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    bytes: Vec<u8>,
}

impl Script {
    /// Creates a new empty script
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a script from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the raw script bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.bytes.push(opcode as u8);
        self
    }

    /// Pushes an integer using the shortest encoding: OP_0, OP_1NEGATE and
    /// OP_1..OP_16 for small values, otherwise a minimal script number.
    pub fn push_int(self, value: i64) -> Self {
        match value {
            0 => self.push_opcode(Opcode::OP_0),
            -1 => self.push_opcode(Opcode::OP_1NEGATE),
            1..=16 => {
                let mut script = self;
                script.bytes.push(Opcode::OP_1 as u8 + (value as u8 - 1));
                script
            }
            _ => self.push_script_num(value),
        }
    }

    /// Pushes the minimal script-number serialization of `value` as data,
    /// even for values that have a dedicated small-integer opcode.
    pub fn push_script_num(self, value: i64) -> Self {
        let encoded = encode_script_num(value);
        self.push_slice(&encoded)
    }

    /// Pushes a data element with the smallest applicable push opcode
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < Opcode::OP_PUSHDATA1 as usize {
            self.bytes.push(len as u8);
        } else if len <= 0xff {
            self.bytes.push(Opcode::OP_PUSHDATA1 as u8);
            self.bytes.push(len as u8);
        } else if len <= 0xffff {
            self.bytes.push(Opcode::OP_PUSHDATA2 as u8);
            self.bytes.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.bytes.push(Opcode::OP_PUSHDATA4 as u8);
            self.bytes.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.bytes.extend_from_slice(data);
        self
    }

    /// `OP_HASH160 <hash> OP_EQUAL`
    pub fn p2sh(script_hash: &[u8; 20]) -> Self {
        Self::new().push_opcode(Opcode::OP_HASH160).push_slice(script_hash).push_opcode(Opcode::OP_EQUAL)
    }

    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        Self::new()
            .push_opcode(Opcode::OP_DUP)
            .push_opcode(Opcode::OP_HASH160)
            .push_slice(pubkey_hash)
            .push_opcode(Opcode::OP_EQUALVERIFY)
            .push_opcode(Opcode::OP_CHECKSIG)
    }

    /// A provably unspendable output script
    pub fn unspendable() -> Self {
        Self::new().push_opcode(Opcode::OP_RETURN)
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Little-endian sign-magnitude encoding with the sign carried in the top bit
/// of the last byte.
pub fn encode_script_num(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while magnitude > 0 {
        out.push((magnitude & 0xff) as u8);
        magnitude >>= 8;
    }
    // The loop always pushes at least one byte for a non-zero value
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}
