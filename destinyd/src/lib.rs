//! Destinyd - Destiny node launcher
//!
//! Resolves the network and its operator overrides from the command line and
//! an optional config file, then selects the process-wide chain parameters.

pub mod cli;
pub mod config;
pub mod ui;

pub use cli::Args;
pub use config::Config;

use consensus_core::config::{select_params, ChainOverrides, ChainParams};
use consensus_core::errors::{OverrideError, ParamsError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("invalid option: {0}")]
    Override(#[from] OverrideError),

    #[error("failed to encode parameters: {0}")]
    Json(#[from] serde_json::Error),
}

/// Merges the config file (if any) with the command line
pub fn load_config(args: &Args) -> Result<Config, NodeError> {
    let mut config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(args);
    Ok(config)
}

/// Parses the overrides for the configured network and selects its parameters
pub fn select_configured_params(config: &Config) -> Result<&'static ChainParams, NodeError> {
    let network = config.network_type()?;
    let overrides = ChainOverrides::read(config, network)?;
    let params = select_params(network, &overrides)?;
    info!("chain parameters ready: genesis {}", params.genesis_block().hash());
    Ok(params)
}

pub fn params_json(params: &ChainParams) -> Result<String, NodeError> {
    Ok(serde_json::to_string_pretty(params)?)
}
