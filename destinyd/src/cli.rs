use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "destinyd")]
#[command(about = "Destiny node: selects the chain parameters for one network", long_about = None)]
pub struct Args {
    /// Path to configuration file (optional, uses defaults if not provided)
    #[arg(short, long)]
    pub config_path: Option<PathBuf>,

    /// Network (main, test, testnet4, signet, regtest)
    #[arg(long, visible_alias = "network")]
    pub chain: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Signet challenge script as hex (signet only)
    #[arg(long = "signetchallenge", value_name = "HEX")]
    pub signet_challenge: Vec<String>,

    /// Signet seed node, may be repeated (signet only)
    #[arg(long = "signetseednode", value_name = "HOST")]
    pub signet_seed_node: Vec<String>,

    /// Buried deployment height as name@height, may be repeated (regtest only)
    #[arg(long = "testactivationheight", value_name = "NAME@HEIGHT")]
    pub test_activation_height: Vec<String>,

    /// Version bits window as deployment:start:end[:min_activation_height]
    #[arg(long = "vbparams", value_name = "DEPLOYMENT:START:END[:MIN]")]
    pub vbparams: Vec<String>,

    /// Lower the prune height for fast pruning tests (regtest only)
    #[arg(long = "fastprune")]
    pub fastprune: bool,

    /// Enforce the timewarp fix (regtest only)
    #[arg(long = "enforcebip94")]
    pub enforce_bip94: bool,

    /// Print the selected parameter set as JSON and exit
    #[arg(long)]
    pub print_params: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
