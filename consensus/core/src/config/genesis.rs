use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::constants::{
    GENESIS_BLOCK_VERSION, GENESIS_COINBASE_TEXT, GENESIS_SCRIPT_BITS, GENESIS_SCRIPT_EXTRA_NONCE, GENESIS_TX_VERSION, INITIAL_BLOCK_REWARD,
};
use crate::errors::{ParamsError, ParamsResult};
use crate::header::Header;
use crate::network::NetworkType;
use crate::script::Script;
use crate::tx::{Transaction, TransactionInput, TransactionOutpoint, TransactionOutput, SEQUENCE_FINAL};
use crate::Hash;
use hex_literal::hex;

/// The literal header fields a genesis block is built from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTemplate {
    pub timestamp: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: u64,
}

impl GenesisTemplate {
    pub const fn new(timestamp: u32, nonce: u32, bits: u32) -> Self {
        Self { timestamp, nonce, bits, version: GENESIS_BLOCK_VERSION, reward: INITIAL_BLOCK_REWARD }
    }

    pub fn build(&self) -> Block {
        build_genesis(self.timestamp, self.nonce, self.bits, self.version, self.reward)
    }
}

pub const MAINNET_GENESIS: GenesisTemplate = GenesisTemplate::new(1_753_258_714, 4_734, 0x1f00_ffff);
pub const TESTNET_GENESIS: GenesisTemplate = GenesisTemplate::new(1_753_345_114, 28_226, 0x1f00_ffff);
pub const TESTNET4_GENESIS: GenesisTemplate = GenesisTemplate::new(1_753_431_514, 97_741, 0x1f00_ffff);
pub const SIGNET_GENESIS: GenesisTemplate = GenesisTemplate::new(1_753_517_914, 3_827_729, 0x1e03_77ae);
pub const REGTEST_GENESIS: GenesisTemplate = GenesisTemplate::new(1_753_258_714, 1, 0x207f_ffff);

/// Hashes a production genesis must reproduce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenesisCommitment {
    pub hash: Hash,
    pub merkle_root: Hash,
}

impl GenesisCommitment {
    pub fn verify(&self, network: NetworkType, genesis: &Block) -> ParamsResult<()> {
        if genesis.header.hash != self.hash {
            return Err(ParamsError::GenesisMismatch {
                network,
                field: "hash",
                computed: genesis.header.hash,
                committed: self.hash,
            });
        }
        if genesis.header.hash_merkle_root != self.merkle_root {
            return Err(ParamsError::GenesisMismatch {
                network,
                field: "merkle root",
                computed: genesis.header.hash_merkle_root,
                committed: self.merkle_root,
            });
        }
        Ok(())
    }
}

pub const MAINNET_GENESIS_COMMITMENT: GenesisCommitment = GenesisCommitment {
    hash: Hash::from_be_bytes(hex!("0000e314b287500c1ab53d85a2b6f90df65f9dff17ead5e8fdad417ca47bcfd8")),
    merkle_root: Hash::from_be_bytes(hex!("87cefb6a57ff85e998e3d61c47cec8f2c7f9c9576cce1ca4b64eec4a40cc5dc4")),
};

/// Builds the genesis block: a single coinbase committing to
/// [`GENESIS_COINBASE_TEXT`] and paying `reward` to an empty script.
pub fn build_genesis(timestamp: u32, nonce: u32, bits: u32, version: i32, reward: u64) -> Block {
    build_genesis_with(GENESIS_COINBASE_TEXT, Script::new(), timestamp, nonce, bits, version, reward)
}

pub fn build_genesis_with(
    coinbase_text: &[u8],
    output_script: Script,
    timestamp: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: u64,
) -> Block {
    let signature_script =
        Script::new().push_int(GENESIS_SCRIPT_BITS).push_script_num(GENESIS_SCRIPT_EXTRA_NONCE).push_slice(coinbase_text);

    let coinbase_tx = Transaction::new(
        GENESIS_TX_VERSION,
        vec![TransactionInput::new(TransactionOutpoint::null(), signature_script, SEQUENCE_FINAL)],
        vec![TransactionOutput::new(reward, output_script)],
        0,
    );

    // A one-element merkle tree's root is the element itself
    let merkle_root = crypto_hashes::merkle_root(&[coinbase_tx.id()]);

    let header = Header::new_finalized(version, Hash::ZERO, merkle_root, timestamp, bits, nonce);
    Block::new(header, vec![coinbase_tx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pow;

    #[test]
    fn coinbase_serialization_is_byte_exact() {
        let genesis = MAINNET_GENESIS.build();
        let expected = concat!(
            "01000000",
            "01",
            "0000000000000000000000000000000000000000000000000000000000000000ffffffff",
            "88",
            "04ffff001d",
            "0104",
            "4c7f",
            "46726f6d2076616c7565732c2070657263657074696f6e20697320626f726e2e2046726f6d2070657263657074696f6e2c206a7564676d656e74206172697365732e2046726f6d206a7564676d656e742c2063686f696365206973206d6164652e2046726f6d2063686f6963652c2064657374696e7920756e666f6c64732e",
            "ffffffff",
            "01",
            "00f2052a01000000",
            "00",
            "00000000",
        );
        assert_eq!(hex::encode(genesis.transactions[0].serialize()), expected);
    }

    #[test]
    fn mainnet_genesis_matches_commitment() {
        let genesis = MAINNET_GENESIS.build();
        assert_eq!(MAINNET_GENESIS_COMMITMENT.verify(NetworkType::Mainnet, &genesis), Ok(()));
        assert_eq!(genesis.hash().to_string(), "0000e314b287500c1ab53d85a2b6f90df65f9dff17ead5e8fdad417ca47bcfd8");
        assert_eq!(
            genesis.header.hash_merkle_root.to_string(),
            "87cefb6a57ff85e998e3d61c47cec8f2c7f9c9576cce1ca4b64eec4a40cc5dc4"
        );
    }

    #[test]
    fn merkle_root_is_the_coinbase_id() {
        let genesis = MAINNET_GENESIS.build();
        assert_eq!(genesis.header.hash_merkle_root, genesis.transactions[0].id());
        assert_eq!(genesis.calculate_merkle_root(), Ok(genesis.header.hash_merkle_root));
        assert!(genesis.transactions[0].is_coinbase());
        assert!(genesis.header.prev_block_hash.is_zero());
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(MAINNET_GENESIS.build(), MAINNET_GENESIS.build());
        assert_eq!(MAINNET_GENESIS.build().serialize(), MAINNET_GENESIS.build().serialize());
    }

    #[test]
    fn drift_breaks_the_commitment() {
        let drifted = GenesisTemplate { nonce: MAINNET_GENESIS.nonce + 1, ..MAINNET_GENESIS }.build();
        let err = MAINNET_GENESIS_COMMITMENT.verify(NetworkType::Mainnet, &drifted).unwrap_err();
        assert!(matches!(err, ParamsError::GenesisMismatch { field: "hash", .. }));

        let other_reward = GenesisTemplate { reward: 1, ..MAINNET_GENESIS }.build();
        assert!(MAINNET_GENESIS_COMMITMENT.verify(NetworkType::Mainnet, &other_reward).is_err());

        let other_text = build_genesis_with(b"other", Script::new(), 1_753_258_714, 4_734, 0x1f00_ffff, 1, INITIAL_BLOCK_REWARD);
        assert_ne!(other_text.header.hash_merkle_root, MAINNET_GENESIS_COMMITMENT.merkle_root);
    }

    #[test]
    fn commitment_checks_merkle_root_too() {
        let genesis = MAINNET_GENESIS.build();
        let commitment = GenesisCommitment { hash: genesis.hash(), merkle_root: Hash::ZERO };
        let err = commitment.verify(NetworkType::Mainnet, &genesis).unwrap_err();
        assert!(matches!(err, ParamsError::GenesisMismatch { field: "merkle root", .. }));
    }

    #[test]
    fn every_template_meets_its_own_target() {
        for template in [MAINNET_GENESIS, TESTNET_GENESIS, TESTNET4_GENESIS, SIGNET_GENESIS, REGTEST_GENESIS] {
            let genesis = template.build();
            let target = pow::compact_to_target(template.bits).unwrap();
            assert!(pow::check_proof_of_work(&genesis.hash(), template.bits, target), "{:?}", template);
        }
    }

    #[test]
    fn output_script_is_configurable() {
        let genesis = build_genesis_with(GENESIS_COINBASE_TEXT, Script::unspendable(), 0, 0, 0x207fffff, 1, 0);
        assert_eq!(genesis.transactions[0].outputs[0].script_public_key.as_bytes(), &[0x6a]);
        assert_eq!(genesis.transactions[0].outputs[0].value, 0);
    }
}
