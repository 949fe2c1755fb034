use serde::{Deserialize, Serialize};

use crate::{errors::ConsensusError, hashing, header::Header, tx::Transaction};
use crate::Hash;

/// Complete block structure including header and transactions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block header
    pub header: Header,
    /// List of transactions in the block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Creates a new block with the given header and transactions
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash
    }

    /// Consensus serialization: header followed by the transaction list
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(crate::header::HEADER_SIZE + 256);
        out.extend_from_slice(&self.header.serialize());
        hashing::write_compact_size(&mut out, self.transactions.len() as u64);
        for tx in &self.transactions {
            tx.encode(&mut out);
        }
        out
    }

    /// Calculates the merkle root of the block's transactions
    pub fn calculate_merkle_root(&self) -> Result<Hash, ConsensusError> {
        if self.transactions.is_empty() {
            return Err(ConsensusError::EmptyTransactionList);
        }
        let tx_hashes: Vec<Hash> = self.transactions.iter().map(|tx| tx.id()).collect();
        Ok(crypto_hashes::merkle_root(&tx_hashes))
    }
}
