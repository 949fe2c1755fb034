use crate::tx::Transaction;
use crate::Hash;

/// SHA256d over the legacy serialization
pub fn calc_transaction_hash(tx: &Transaction) -> Hash {
    super::double_sha256(&tx.serialize())
}
