use consensus_core::config::overrides::{
    ENFORCE_BIP94_OPTION, FASTPRUNE_OPTION, SIGNET_CHALLENGE_OPTION, SIGNET_SEED_NODE_OPTION, TEST_ACTIVATION_HEIGHT_OPTION,
    VBPARAMS_OPTION,
};
use consensus_core::config::OptionSource;
use consensus_core::errors::ParamsError;
use consensus_core::network::NetworkType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network name, as accepted by `--chain`
    pub network: Option<String>,
    pub chain: ChainConfig,
}

/// Parameter overrides; names match the command line options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    #[serde(rename = "signetchallenge")]
    pub signet_challenge: Vec<String>,
    #[serde(rename = "signetseednode")]
    pub signet_seed_node: Vec<String>,
    #[serde(rename = "testactivationheight")]
    pub test_activation_height: Vec<String>,
    pub vbparams: Vec<String>,
    pub fastprune: Option<bool>,
    #[serde(rename = "enforcebip94")]
    pub enforce_bip94: Option<bool>,
}

impl Config {
    /// Load configuration from an explicitly named file, which must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Override config with CLI arguments. Lists given on the command line
    /// replace the configured ones.
    pub fn apply_cli_overrides(&mut self, args: &crate::cli::Args) {
        if let Some(chain) = &args.chain {
            self.network = Some(chain.clone());
        }

        replace_if_given(&mut self.chain.signet_challenge, &args.signet_challenge);
        replace_if_given(&mut self.chain.signet_seed_node, &args.signet_seed_node);
        replace_if_given(&mut self.chain.test_activation_height, &args.test_activation_height);
        replace_if_given(&mut self.chain.vbparams, &args.vbparams);

        if args.fastprune {
            self.chain.fastprune = Some(true);
        }
        if args.enforce_bip94 {
            self.chain.enforce_bip94 = Some(true);
        }
    }

    /// The configured network, main when none is set
    pub fn network_type(&self) -> Result<NetworkType, ParamsError> {
        match &self.network {
            Some(name) => NetworkType::from_str(name),
            None => Ok(NetworkType::Mainnet),
        }
    }
}

fn replace_if_given(target: &mut Vec<String>, given: &[String]) {
    if !given.is_empty() {
        *target = given.to_vec();
    }
}

impl OptionSource for Config {
    fn get_string_list(&self, name: &str) -> Vec<String> {
        match name {
            SIGNET_CHALLENGE_OPTION => self.chain.signet_challenge.clone(),
            SIGNET_SEED_NODE_OPTION => self.chain.signet_seed_node.clone(),
            TEST_ACTIVATION_HEIGHT_OPTION => self.chain.test_activation_height.clone(),
            VBPARAMS_OPTION => self.chain.vbparams.clone(),
            _ => Vec::new(),
        }
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        match name {
            FASTPRUNE_OPTION => self.chain.fastprune,
            ENFORCE_BIP94_OPTION => self.chain.enforce_bip94,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;

    #[test]
    fn cli_lists_replace_config_lists() {
        let mut config = Config {
            network: Some("signet".to_string()),
            chain: ChainConfig {
                signet_seed_node: vec!["seed.example:38555".to_string()],
                vbparams: vec!["testdummy:1:2".to_string()],
                ..Default::default()
            },
        };
        let args = Args { vbparams: vec!["taproot:3:4".to_string()], ..Default::default() };
        config.apply_cli_overrides(&args);

        assert_eq!(config.get_string_list(VBPARAMS_OPTION), vec!["taproot:3:4"]);
        assert_eq!(config.get_string_list(SIGNET_SEED_NODE_OPTION), vec!["seed.example:38555"]);
        assert_eq!(config.network_type().unwrap(), NetworkType::Signet);
    }

    #[test]
    fn unset_flags_stay_unset() {
        let mut config = Config::default();
        config.apply_cli_overrides(&Args::default());
        assert_eq!(config.get_bool(FASTPRUNE_OPTION), None);
        assert_eq!(config.network_type().unwrap(), NetworkType::Mainnet);

        config.apply_cli_overrides(&Args { fastprune: true, ..Default::default() });
        assert_eq!(config.get_bool(FASTPRUNE_OPTION), Some(true));
        assert_eq!(config.get_bool("unknown"), None);
    }

    #[test]
    fn unknown_network_name() {
        let config = Config { network: Some("moonnet".to_string()), ..Default::default() };
        assert_eq!(config.network_type(), Err(ParamsError::UnknownNetwork("moonnet".to_string())));
    }
}
