//!
//! # Transaction
//!
//! The consensus [`Transaction`] structure in its legacy (non-witness)
//! serialization, which is all a genesis coinbase needs.
//!

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::hashing;
use crate::script::Script;
use crate::Hash;

/// A 32-byte transaction identifier.
pub type TransactionId = crate::Hash;

pub type TransactionIndexType = u32;

/// Sequence value marking an input as final
pub const SEQUENCE_FINAL: u32 = u32::MAX;

/// Represents a transaction outpoint
#[derive(Eq, Default, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: TransactionIndexType,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }

    /// The outpoint carried by coinbase inputs, which spend nothing
    pub fn null() -> Self {
        Self { transaction_id: Hash::ZERO, index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.transaction_id.is_zero() && self.index == u32::MAX
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}

/// Represents a transaction input
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Script,
    pub sequence: u32,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Script, sequence: u32) -> Self {
        Self { previous_outpoint, signature_script, sequence }
    }
}

/// Represents a transaction output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: Script,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: Script) -> Self {
        Self { value, script_public_key }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: i32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    /// A coinbase has exactly one input, and that input spends the null outpoint
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_outpoint.is_null()
    }

    /// Consensus serialization of the transaction
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.version.to_le_bytes());
        hashing::write_compact_size(out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(input.previous_outpoint.transaction_id.as_bytes());
            out.extend_from_slice(&input.previous_outpoint.index.to_le_bytes());
            hashing::write_var_bytes(out, input.signature_script.as_bytes());
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        hashing::write_compact_size(out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            hashing::write_var_bytes(out, output.script_public_key.as_bytes());
        }
        out.extend_from_slice(&self.lock_time.to_le_bytes());
    }

    /// Returns the transaction id
    pub fn id(&self) -> TransactionId {
        hashing::tx::calc_transaction_hash(self)
    }
}
