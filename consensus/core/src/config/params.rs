pub use super::deployments::{BuriedDeployment, DeploymentPos, VersionBitsDeployment, MAX_VERSION_BITS_DEPLOYMENTS};
use super::deployments::{TAPROOT_BIT, TESTDUMMY_BIT};
use super::overrides::VersionBitsOverride;
use crate::constants::SUBSIDY_HALVING_INTERVAL;
use crate::errors::{ParamsError, ParamsResult};
use crate::Hash;
use hex_literal::hex;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest difficulty on the production and public test networks
pub const MAINNET_POW_LIMIT: [u8; 32] = hex!("0000ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
pub const SIGNET_POW_LIMIT: [u8; 32] = hex!("00000377ae000000000000000000000000000000000000000000000000000000");
pub const REGTEST_POW_LIMIT: [u8; 32] = hex!("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");

/// Bits 29..31 of nVersion carry the version-bits top marker
pub const MAX_SIGNAL_BIT: u8 = 28;

/// Consensus rules a network is validated against.
///
/// Built once per network by the functions below and never mutated after the
/// owning [`ChainParams`](super::registry::ChainParams) is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub hash_genesis_block: Hash,
    pub subsidy_halving_interval: u32,
    /// Block height and hash at which BIP34 becomes active
    pub bip34_height: u32,
    /// Block height at which BIP65 becomes active
    pub bip65_height: u32,
    /// Block height at which BIP66 becomes active
    pub bip66_height: u32,
    /// Block height at which CSV (BIP68, BIP112 and BIP113) becomes active
    pub csv_height: u32,
    /// Block height at which Segwit (BIP141, BIP143 and BIP147) becomes active.
    /// Note that segwit v0 script rules are enforced on all blocks except the
    /// BIP 16 exception blocks.
    pub segwit_height: u32,
    /// Minimum blocks including miner confirmation of the total of
    /// `miner_confirmation_window` blocks in a retargeting period
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: [VersionBitsDeployment; MAX_VERSION_BITS_DEPLOYMENTS],
    /// Proof of work parameters
    pub pow_limit: U256,
    pub pow_allow_min_difficulty_blocks: bool,
    /// Enforce the testnet4 timewarp fix
    pub enforce_bip94: bool,
    pub pow_no_retargeting: bool,
    pub pow_target_spacing: u64,
    pub pow_target_timespan: u64,
    /// Blocks carry a signet solution committing to `signet_challenge`
    pub signet_blocks: bool,
    pub signet_challenge: Vec<u8>,
}

impl ConsensusParams {
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    pub fn buried_height(&self, dep: BuriedDeployment) -> u32 {
        match dep {
            BuriedDeployment::HeightInCb => self.bip34_height,
            BuriedDeployment::Cltv => self.bip65_height,
            BuriedDeployment::DerSig => self.bip66_height,
            BuriedDeployment::Csv => self.csv_height,
            BuriedDeployment::Segwit => self.segwit_height,
        }
    }

    pub(crate) fn set_buried_height(&mut self, dep: BuriedDeployment, height: u32) {
        match dep {
            BuriedDeployment::HeightInCb => self.bip34_height = height,
            BuriedDeployment::Cltv => self.bip65_height = height,
            BuriedDeployment::DerSig => self.bip66_height = height,
            BuriedDeployment::Csv => self.csv_height = height,
            BuriedDeployment::Segwit => self.segwit_height = height,
        }
    }

    pub fn deployment(&self, pos: DeploymentPos) -> &VersionBitsDeployment {
        &self.deployments[pos.index()]
    }

    /// Replaces the signaling window of each overridden deployment, keeping its bit
    pub(crate) fn apply_version_bits(&mut self, overrides: &BTreeMap<DeploymentPos, VersionBitsOverride>) {
        for (pos, vb) in overrides {
            let deployment = &mut self.deployments[pos.index()];
            deployment.start_time = vb.start_time;
            deployment.timeout = vb.timeout;
            deployment.min_activation_height = vb.min_activation_height;
        }
    }

    /// Every deployment signals on its own bit below the version-bits top marker
    pub fn validate(&self) -> ParamsResult<()> {
        let mut seen = 0u32;
        for (pos, deployment) in DeploymentPos::ALL.into_iter().zip(&self.deployments) {
            if deployment.bit > MAX_SIGNAL_BIT {
                return Err(ParamsError::InvalidSignalBit { deployment: pos, bit: deployment.bit });
            }
            let mask = 1u32 << deployment.bit;
            if seen & mask != 0 {
                return Err(ParamsError::SharedSignalBit { deployment: pos, bit: deployment.bit });
            }
            seen |= mask;
        }
        Ok(())
    }
}

/// Defaults shared by every network; each network constructor starts here
/// and overrides what differs.
pub fn base_consensus_params(hash_genesis_block: Hash) -> ConsensusParams {
    ConsensusParams {
        hash_genesis_block,
        subsidy_halving_interval: SUBSIDY_HALVING_INTERVAL,
        bip34_height: 1,
        bip65_height: 1,
        bip66_height: 1,
        csv_height: 1,
        segwit_height: 0,
        rule_change_activation_threshold: 33, // 90% of 36
        miner_confirmation_window: 36,        // pow_target_timespan / pow_target_spacing
        deployments: [VersionBitsDeployment::never_active(TESTDUMMY_BIT), VersionBitsDeployment::never_active(TAPROOT_BIT)],
        pow_limit: U256::from_big_endian(&MAINNET_POW_LIMIT),
        pow_allow_min_difficulty_blocks: true,
        enforce_bip94: false,
        pow_no_retargeting: false,
        pow_target_spacing: 5 * 60,       // 5 minutes
        pow_target_timespan: 3 * 60 * 60, // 3 hours
        signet_blocks: false,
        signet_challenge: Vec::new(),
    }
}

pub fn mainnet_consensus_params(hash_genesis_block: Hash) -> ConsensusParams {
    base_consensus_params(hash_genesis_block)
}

pub fn testnet_consensus_params(hash_genesis_block: Hash) -> ConsensusParams {
    ConsensusParams {
        rule_change_activation_threshold: 27, // 75% for testchains
        ..base_consensus_params(hash_genesis_block)
    }
}

pub fn testnet4_consensus_params(hash_genesis_block: Hash) -> ConsensusParams {
    ConsensusParams { enforce_bip94: true, ..testnet_consensus_params(hash_genesis_block) }
}

pub fn signet_consensus_params(hash_genesis_block: Hash, challenge: Vec<u8>) -> ConsensusParams {
    ConsensusParams {
        pow_limit: U256::from_big_endian(&SIGNET_POW_LIMIT),
        pow_allow_min_difficulty_blocks: false,
        signet_blocks: true,
        signet_challenge: challenge,
        ..base_consensus_params(hash_genesis_block)
    }
}

pub fn regtest_consensus_params(hash_genesis_block: Hash) -> ConsensusParams {
    ConsensusParams {
        subsidy_halving_interval: 150,
        rule_change_activation_threshold: 108, // 75% for testchains
        miner_confirmation_window: 144,
        deployments: [VersionBitsDeployment::always_active(TESTDUMMY_BIT), VersionBitsDeployment::always_active(TAPROOT_BIT)],
        pow_limit: U256::from_big_endian(&REGTEST_POW_LIMIT),
        pow_no_retargeting: true,
        ..base_consensus_params(hash_genesis_block)
    }
}
