//! Operator overrides for the test networks.
//!
//! Every parser here is a pure function over an [`OptionSource`]: it either
//! returns a fully validated structure or the first [`OverrideError`]
//! encountered. Nothing is applied until the whole option set parsed, so a bad
//! token never leaves a half-configured network behind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::config::deployments::{BuriedDeployment, DeploymentPos};
use crate::config::genesis::GenesisTemplate;
use crate::constants::MAX_ACTIVATION_HEIGHT;
use crate::errors::{OverrideError, OverrideResult};
use crate::network::NetworkType;

pub const SIGNET_CHALLENGE_OPTION: &str = "signetchallenge";
pub const SIGNET_SEED_NODE_OPTION: &str = "signetseednode";
pub const TEST_ACTIVATION_HEIGHT_OPTION: &str = "testactivationheight";
pub const VBPARAMS_OPTION: &str = "vbparams";
pub const FASTPRUNE_OPTION: &str = "fastprune";
pub const ENFORCE_BIP94_OPTION: &str = "enforcebip94";

/// Read-only view of operator options
pub trait OptionSource {
    /// All values given for `name`, in the order they were supplied
    fn get_string_list(&self, name: &str) -> Vec<String>;

    /// `None` when the flag was not given at all
    fn get_bool(&self, name: &str) -> Option<bool>;
}

/// `deployment:start:end[:min_activation_height]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBitsOverride {
    pub deployment: DeploymentPos,
    pub start_time: i64,
    pub timeout: i64,
    pub min_activation_height: u32,
}

/// `name@height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationHeightOverride {
    pub deployment: BuriedDeployment,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigNetOptions {
    /// Raw challenge script; `None` selects the default signet
    pub challenge: Option<Vec<u8>>,
    /// Replacement seed list; `None` keeps the network's own
    pub seeds: Option<Vec<String>>,
    pub version_bits_parameters: BTreeMap<DeploymentPos, VersionBitsOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegTestOptions {
    pub activation_heights: BTreeMap<BuriedDeployment, u32>,
    pub version_bits_parameters: BTreeMap<DeploymentPos, VersionBitsOverride>,
    pub fastprune: bool,
    pub enforce_bip94: bool,
    /// Replacement genesis literals for local experiments
    pub genesis: Option<GenesisTemplate>,
}

/// Everything the registry needs from the operator for any network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOverrides {
    pub signet: SigNetOptions,
    pub regtest: RegTestOptions,
}

impl ChainOverrides {
    /// Parses only the options that apply to `network`; the production and
    /// public test networks take none.
    pub fn read(args: &dyn OptionSource, network: NetworkType) -> OverrideResult<Self> {
        let mut overrides = Self::default();
        match network {
            NetworkType::Signet => overrides.signet = read_signet_options(args)?,
            NetworkType::Regtest => overrides.regtest = read_regtest_options(args)?,
            NetworkType::Mainnet | NetworkType::Testnet | NetworkType::Testnet4 => {}
        }
        Ok(overrides)
    }
}

pub fn read_signet_options(args: &dyn OptionSource) -> OverrideResult<SigNetOptions> {
    let challenge = parse_signet_challenge(&args.get_string_list(SIGNET_CHALLENGE_OPTION))?;
    let seeds = args.get_string_list(SIGNET_SEED_NODE_OPTION);
    let version_bits_parameters = parse_version_bits_list(&args.get_string_list(VBPARAMS_OPTION))?;
    Ok(SigNetOptions { challenge, seeds: (!seeds.is_empty()).then_some(seeds), version_bits_parameters })
}

pub fn read_regtest_options(args: &dyn OptionSource) -> OverrideResult<RegTestOptions> {
    let mut activation_heights = BTreeMap::new();
    for token in args.get_string_list(TEST_ACTIVATION_HEIGHT_OPTION) {
        let parsed = parse_activation_height(&token)?;
        activation_heights.insert(parsed.deployment, parsed.height);
    }
    let version_bits_parameters = parse_version_bits_list(&args.get_string_list(VBPARAMS_OPTION))?;

    Ok(RegTestOptions {
        activation_heights,
        version_bits_parameters,
        fastprune: args.get_bool(FASTPRUNE_OPTION).unwrap_or(false),
        enforce_bip94: args.get_bool(ENFORCE_BIP94_OPTION).unwrap_or(false),
        genesis: None,
    })
}

/// At most one value, which must be hex
pub fn parse_signet_challenge(values: &[String]) -> OverrideResult<Option<Vec<u8>>> {
    match values {
        [] => Ok(None),
        [value] => hex::decode(value)
            .map(Some)
            .map_err(|_| OverrideError::InvalidHex { option: SIGNET_CHALLENGE_OPTION, token: value.clone() }),
        _ => Err(OverrideError::MultipleValues { option: SIGNET_CHALLENGE_OPTION, count: values.len() }),
    }
}

pub fn parse_activation_height(token: &str) -> OverrideResult<ActivationHeightOverride> {
    let option = TEST_ACTIVATION_HEIGHT_OPTION;
    let (name, height_str) = token.split_once('@').ok_or_else(|| OverrideError::InvalidFormat {
        option,
        token: token.to_string(),
        expected: "name@height",
    })?;

    let height = match height_str.parse::<i64>() {
        Ok(h) if (0..i64::from(MAX_ACTIVATION_HEIGHT)).contains(&h) => h as u32,
        _ => return Err(OverrideError::InvalidHeight { option, token: token.to_string() }),
    };

    let deployment = BuriedDeployment::from_name(name).ok_or_else(|| OverrideError::UnknownDeployment {
        option,
        name: name.to_string(),
        token: token.to_string(),
    })?;

    Ok(ActivationHeightOverride { deployment, height })
}

pub fn parse_version_bits_parameters(token: &str) -> OverrideResult<VersionBitsOverride> {
    let option = VBPARAMS_OPTION;
    let fields: Vec<&str> = token.split(':').collect();
    if fields.len() != 3 && fields.len() != 4 {
        return Err(OverrideError::InvalidFormat {
            option,
            token: token.to_string(),
            expected: "deployment:start:end[:min_activation_height]",
        });
    }

    let number_error = |field: &'static str, value: &str| OverrideError::InvalidNumber {
        option,
        field,
        value: value.to_string(),
        token: token.to_string(),
    };

    let start_time = fields[1].parse::<i64>().map_err(|_| number_error("start", fields[1]))?;
    let timeout = fields[2].parse::<i64>().map_err(|_| number_error("timeout", fields[2]))?;
    let min_activation_height = match fields.get(3) {
        None => 0,
        Some(raw) => match raw.parse::<i32>() {
            Ok(h) if h >= 0 => h as u32,
            _ => return Err(number_error("min_activation_height", *raw)),
        },
    };

    let deployment = DeploymentPos::from_name(fields[0]).ok_or_else(|| OverrideError::UnknownDeployment {
        option,
        name: fields[0].to_string(),
        token: token.to_string(),
    })?;

    info!(
        "Setting version bits activation parameters for {} to start={}, timeout={}, min_activation_height={}",
        deployment, start_time, timeout, min_activation_height
    );

    Ok(VersionBitsOverride { deployment, start_time, timeout, min_activation_height })
}

fn parse_version_bits_list(tokens: &[String]) -> OverrideResult<BTreeMap<DeploymentPos, VersionBitsOverride>> {
    let mut parsed = BTreeMap::new();
    for token in tokens {
        let vb = parse_version_bits_parameters(token)?;
        parsed.insert(vb.deployment, vb);
    }
    Ok(parsed)
}

/// In-memory option source, handy for tests and embedders
#[derive(Debug, Clone, Default)]
pub struct MemoryOptions {
    lists: BTreeMap<String, Vec<String>>,
    flags: BTreeMap<String, bool>,
}

impl MemoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.lists.entry(name.to_string()).or_default().push(value.to_string());
        self
    }

    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.flags.insert(name.to_string(), value);
        self
    }
}

impl OptionSource for MemoryOptions {
    fn get_string_list(&self, name: &str) -> Vec<String> {
        self.lists.get(name).cloned().unwrap_or_default()
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }
}
