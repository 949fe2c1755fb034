//! Per-network identity literals.

use hex_literal::hex;

use crate::hashing::{double_sha256, write_var_bytes};
use crate::network::{Base58Prefixes, MessageStart, NetworkIdentity};

pub const MAINNET_MESSAGE_START: MessageStart = [0xda, 0x9e, 0xb5, 0xda];
pub const TESTNET_MESSAGE_START: MessageStart = [0x0b, 0x12, 0x0a, 0x08];
pub const TESTNET4_MESSAGE_START: MessageStart = [0x1c, 0x16, 0x3f, 0x28];
pub const REGTEST_MESSAGE_START: MessageStart = [0xfa, 0xbf, 0xb5, 0xda];

pub const MAINNET_DEFAULT_PORT: u16 = 8555;
pub const TESTNET_DEFAULT_PORT: u16 = 18555;
pub const TESTNET4_DEFAULT_PORT: u16 = 48555;
pub const SIGNET_DEFAULT_PORT: u16 = 38555;
pub const REGTEST_DEFAULT_PORT: u16 = 18666;

/// 1-of-2 multisig challenge of the default signet
pub const DEFAULT_SIGNET_CHALLENGE: [u8; 71] = hex!(
    "512103ad5e0edad18cb1f0fc0d28a3d4f1f3e445640337489abb10404f2d1e086be430210359ef5021964fe22d6f8e05b2463c9540ce96883fe3b278760f048f5189f2e6c452ae"
);

fn mainnet_prefixes() -> Base58Prefixes {
    Base58Prefixes {
        pubkey_address: vec![0],
        script_address: vec![5],
        secret_key: vec![128],
        ext_public_key: vec![0x04, 0x88, 0xb2, 0x1e],
        ext_secret_key: vec![0x04, 0x88, 0xad, 0xe4],
    }
}

/// Shared by every test network
fn testnet_prefixes() -> Base58Prefixes {
    Base58Prefixes {
        pubkey_address: vec![111],
        script_address: vec![196],
        secret_key: vec![239],
        ext_public_key: vec![0x04, 0x35, 0x87, 0xcf],
        ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
    }
}

pub fn mainnet_identity() -> NetworkIdentity {
    NetworkIdentity {
        message_start: MAINNET_MESSAGE_START,
        default_port: MAINNET_DEFAULT_PORT,
        base58_prefixes: mainnet_prefixes(),
        bech32_hrp: "bc".to_string(),
        dns_seeds: Vec::new(),
        prune_after_height: 1000,
        assumed_blockchain_size: 1,
        assumed_chain_state_size: 1,
    }
}

pub fn testnet_identity() -> NetworkIdentity {
    NetworkIdentity {
        message_start: TESTNET_MESSAGE_START,
        default_port: TESTNET_DEFAULT_PORT,
        base58_prefixes: testnet_prefixes(),
        bech32_hrp: "tb".to_string(),
        dns_seeds: Vec::new(),
        prune_after_height: 1000,
        assumed_blockchain_size: 1,
        assumed_chain_state_size: 1,
    }
}

/// Testnet4 differs from testnet only in magic and port
pub fn testnet4_identity() -> NetworkIdentity {
    NetworkIdentity { message_start: TESTNET4_MESSAGE_START, default_port: TESTNET4_DEFAULT_PORT, ..testnet_identity() }
}

pub fn signet_identity(challenge: &[u8], dns_seeds: Vec<String>) -> NetworkIdentity {
    NetworkIdentity {
        message_start: signet_message_start(challenge),
        default_port: SIGNET_DEFAULT_PORT,
        dns_seeds,
        ..testnet_identity()
    }
}

pub fn regtest_identity(fastprune: bool) -> NetworkIdentity {
    NetworkIdentity {
        message_start: REGTEST_MESSAGE_START,
        default_port: REGTEST_DEFAULT_PORT,
        base58_prefixes: testnet_prefixes(),
        bech32_hrp: "bcrt".to_string(),
        dns_seeds: Vec::new(),
        prune_after_height: if fastprune { 100 } else { 1000 },
        assumed_blockchain_size: 0,
        assumed_chain_state_size: 0,
    }
}

/// A signet's magic is the first four bytes of SHA256d over its
/// length-prefixed challenge script, so every challenge gets its own network.
pub fn signet_message_start(challenge: &[u8]) -> MessageStart {
    let mut serialized = Vec::with_capacity(challenge.len() + 9);
    write_var_bytes(&mut serialized, challenge);
    let hash = double_sha256(&serialized);
    let mut start = [0u8; 4];
    start.copy_from_slice(&hash.as_bytes()[..4]);
    start
}
