use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParamsError;

/// Network type identifies the network a node is operating on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Main network
    Mainnet,
    /// Public test network
    Testnet,
    /// Second-generation public test network
    Testnet4,
    /// Signature-authorized test network
    Signet,
    /// Local regression-test network
    Regtest,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "main"),
            NetworkType::Testnet => write!(f, "test"),
            NetworkType::Testnet4 => write!(f, "testnet4"),
            NetworkType::Signet => write!(f, "signet"),
            NetworkType::Regtest => write!(f, "regtest"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" | "mainnet" => Ok(NetworkType::Mainnet),
            "test" | "testnet" => Ok(NetworkType::Testnet),
            "testnet4" => Ok(NetworkType::Testnet4),
            "signet" => Ok(NetworkType::Signet),
            "regtest" => Ok(NetworkType::Regtest),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}

impl NetworkType {
    /// Returns an iterator over all NetworkType variants
    pub fn iter() -> impl Iterator<Item = NetworkType> {
        [NetworkType::Mainnet, NetworkType::Testnet, NetworkType::Testnet4, NetworkType::Signet, NetworkType::Regtest].into_iter()
    }

    pub fn is_production(self) -> bool {
        self == NetworkType::Mainnet
    }
}

/// Four bytes prefixing every p2p message of a network
pub type MessageStart = [u8; 4];

/// Address classes with their own base58 version prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] =
        [Base58Type::PubkeyAddress, Base58Type::ScriptAddress, Base58Type::SecretKey, Base58Type::ExtPublicKey, Base58Type::ExtSecretKey];
}

/// Version bytes for each [`Base58Type`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

/// Everything peers and address encoders need to tell networks apart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentity {
    pub message_start: MessageStart,
    pub default_port: u16,
    pub base58_prefixes: Base58Prefixes,
    /// Human-readable part of segwit addresses
    pub bech32_hrp: String,
    pub dns_seeds: Vec<String>,
    /// Blocks below this height are never pruned
    pub prune_after_height: u64,
    /// Estimated on-disk size of the block chain, in GB
    pub assumed_blockchain_size: u64,
    /// Estimated on-disk size of the chain state, in GB
    pub assumed_chain_state_size: u64,
}

impl NetworkIdentity {
    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }
}
