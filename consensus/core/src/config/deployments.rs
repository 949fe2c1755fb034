//! Soft-fork deployments: rules buried at a fixed height and rules
//! activated through version-bits signaling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule changes enforced unconditionally from a fixed height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuriedDeployment {
    /// Height in coinbase
    HeightInCb,
    /// OP_CHECKLOCKTIMEVERIFY
    Cltv,
    /// Strict DER signatures
    DerSig,
    /// OP_CHECKSEQUENCEVERIFY and relative lock-times
    Csv,
    /// Segregated witness
    Segwit,
}

impl BuriedDeployment {
    pub const ALL: [BuriedDeployment; 5] =
        [BuriedDeployment::HeightInCb, BuriedDeployment::Cltv, BuriedDeployment::DerSig, BuriedDeployment::Csv, BuriedDeployment::Segwit];

    /// Name accepted by `-testactivationheight`
    pub fn name(self) -> &'static str {
        match self {
            BuriedDeployment::HeightInCb => "bip34",
            BuriedDeployment::Cltv => "cltv",
            BuriedDeployment::DerSig => "dersig",
            BuriedDeployment::Csv => "csv",
            BuriedDeployment::Segwit => "segwit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for BuriedDeployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slots of the version-bits deployment table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeploymentPos {
    TestDummy,
    Taproot,
}

/// Number of version-bits deployment slots
pub const MAX_VERSION_BITS_DEPLOYMENTS: usize = 2;

impl DeploymentPos {
    pub const ALL: [DeploymentPos; MAX_VERSION_BITS_DEPLOYMENTS] = [DeploymentPos::TestDummy, DeploymentPos::Taproot];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Name accepted by `-vbparams`
    pub fn name(self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Taproot => "taproot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for DeploymentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signaling window of a single version-bits deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBitsDeployment {
    /// Bit position to select the particular bit in nVersion
    pub bit: u8,
    /// Start median time past for version bits miner confirmation, or one of
    /// the [`ALWAYS_ACTIVE`](Self::ALWAYS_ACTIVE) / [`NEVER_ACTIVE`](Self::NEVER_ACTIVE) sentinels
    pub start_time: i64,
    /// Timeout median time past; [`NO_TIMEOUT`](Self::NO_TIMEOUT) disables it
    pub timeout: i64,
    /// Earliest height at which the deployment may become active
    pub min_activation_height: u32,
}

impl VersionBitsDeployment {
    /// Special start time: the deployment is active from genesis
    pub const ALWAYS_ACTIVE: i64 = -1;
    /// Special start time: the deployment never activates
    pub const NEVER_ACTIVE: i64 = -2;
    /// Special timeout: signaling never times out
    pub const NO_TIMEOUT: i64 = i64::MAX;

    pub const fn new(bit: u8, start_time: i64, timeout: i64, min_activation_height: u32) -> Self {
        Self { bit, start_time, timeout, min_activation_height }
    }

    pub const fn never_active(bit: u8) -> Self {
        Self::new(bit, Self::NEVER_ACTIVE, Self::NO_TIMEOUT, 0)
    }

    pub const fn always_active(bit: u8) -> Self {
        Self::new(bit, Self::ALWAYS_ACTIVE, Self::NO_TIMEOUT, 0)
    }

    pub fn is_always_active(&self) -> bool {
        self.start_time == Self::ALWAYS_ACTIVE
    }

    pub fn is_never_active(&self) -> bool {
        self.start_time == Self::NEVER_ACTIVE
    }
}

/// Signal bits of the two deployments
pub const TESTDUMMY_BIT: u8 = 28;
pub const TAPROOT_BIT: u8 = 2;
