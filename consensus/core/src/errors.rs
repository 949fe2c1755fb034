use thiserror::Error;

use crate::config::deployments::DeploymentPos;
use crate::network::NetworkType;
use crate::Hash;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("Empty transaction list")]
    EmptyTransactionList,
}

/// A rejected operator override. Every variant names the option and the
/// offending token so the caller can report it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverrideError {
    #[error("-{option}: multiple values are not allowed (got {count})")]
    MultipleValues { option: &'static str, count: usize },

    #[error("-{option}: value '{token}' is not valid hex")]
    InvalidHex { option: &'static str, token: String },

    #[error("-{option}: invalid format '{token}', expected {expected}")]
    InvalidFormat { option: &'static str, token: String, expected: &'static str },

    #[error("-{option}: invalid height in '{token}'")]
    InvalidHeight { option: &'static str, token: String },

    #[error("-{option}: invalid {field} '{value}' in '{token}'")]
    InvalidNumber { option: &'static str, field: &'static str, value: String, token: String },

    #[error("-{option}: unknown deployment '{name}' in '{token}'")]
    UnknownDeployment { option: &'static str, name: String, token: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParamsError {
    #[error("chain parameters already selected ({0})")]
    AlreadySelected(NetworkType),

    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("{network} genesis {field} mismatch: computed {computed}, committed {committed}")]
    GenesisMismatch { network: NetworkType, field: &'static str, computed: Hash, committed: Hash },

    #[error("checkpoint heights must strictly increase: {previous} then {next}")]
    InvalidCheckpoints { previous: u32, next: u32 },

    #[error("deployment {deployment} signals on bit {bit}, above the highest usable bit")]
    InvalidSignalBit { deployment: DeploymentPos, bit: u8 },

    #[error("deployment {deployment} shares signal bit {bit} with another deployment")]
    SharedSignalBit { deployment: DeploymentPos, bit: u8 },
}

pub type OverrideResult<T> = std::result::Result<T, OverrideError>;
pub type ParamsResult<T> = std::result::Result<T, ParamsError>;
