//! Console output for the node launcher

use consensus_core::config::deployments::{BuriedDeployment, DeploymentPos};
use consensus_core::config::ChainParams;

/// ANSI color codes for terminal output
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
    pub const BRIGHT_WHITE: &str = "\x1b[97m";
}

/// Print startup banner
pub fn print_banner(version: &str, network: &str) {
    println!();
    println!("{}╔══════════════════════════════════════════════════════════════╗{}", colors::BRIGHT_CYAN, colors::RESET);
    println!("{}║{}          {}DESTINY NODE - DESTINYD v{:<12}{}                   {}║{}",
        colors::BRIGHT_CYAN, colors::RESET, colors::BOLD, version, colors::RESET, colors::BRIGHT_CYAN, colors::RESET);
    println!("{}║{}  Network: {}{:<50}{}  {}║{}",
        colors::BRIGHT_CYAN, colors::RESET, colors::BRIGHT_GREEN, network, colors::RESET, colors::BRIGHT_CYAN, colors::RESET);
    println!("{}╚══════════════════════════════════════════════════════════════╝{}", colors::BRIGHT_CYAN, colors::RESET);
    println!();
}

/// Print status line with icon and color
pub fn print_status(icon: &str, message: &str, status: StatusType) {
    let color = match status {
        StatusType::Success => colors::BRIGHT_GREEN,
        StatusType::Error => colors::BRIGHT_RED,
    };

    println!("{}[{}]{} {} {}{}", color, icon, colors::RESET, color, message, colors::RESET);
}

/// Status types for colored output
#[derive(Debug, Clone, Copy)]
pub enum StatusType {
    Success,
    Error,
}

/// Print a section header
pub fn print_section(title: &str) {
    println!();
    println!("{}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{}", colors::DIM, colors::RESET);
    println!("{}  {}{}{}", colors::BRIGHT_CYAN, colors::BOLD, title, colors::RESET);
    println!("{}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{}", colors::DIM, colors::RESET);
    println!();
}

/// Print key-value pair in a formatted way
pub fn print_kv(key: &str, value: &str) {
    println!("  {}{}:{} {}{}{}", colors::BRIGHT_WHITE, key, colors::RESET, colors::BRIGHT_CYAN, value, colors::RESET);
}

/// Key-value rows describing the selected parameter set
pub fn params_summary(params: &ChainParams) -> Vec<(String, String)> {
    let consensus = params.consensus();
    let identity = params.identity();
    let mut rows = vec![
        ("Network".to_string(), params.network().to_string()),
        ("Genesis".to_string(), params.genesis_block().hash().to_string()),
        ("Merkle Root".to_string(), params.genesis_block().header.hash_merkle_root.to_string()),
        ("Message Start".to_string(), hex::encode(params.message_start())),
        ("Default Port".to_string(), params.default_port().to_string()),
        ("Bech32 HRP".to_string(), identity.bech32_hrp.clone()),
        ("Prune After".to_string(), identity.prune_after_height.to_string()),
        ("Checkpoints".to_string(), params.checkpoints().len().to_string()),
    ];
    for dep in BuriedDeployment::ALL {
        rows.push((format!("Height {}", dep), consensus.buried_height(dep).to_string()));
    }
    for pos in DeploymentPos::ALL {
        let deployment = consensus.deployment(pos);
        let window = if deployment.is_always_active() {
            "always active".to_string()
        } else if deployment.is_never_active() {
            "never active".to_string()
        } else {
            format!("{}..{} min {}", deployment.start_time, deployment.timeout, deployment.min_activation_height)
        };
        rows.push((format!("Deployment {} (bit {})", pos, deployment.bit), window));
    }
    if consensus.signet_blocks {
        rows.push(("Signet Challenge".to_string(), hex::encode(&consensus.signet_challenge)));
    }
    if !identity.dns_seeds.is_empty() {
        rows.push(("Seeds".to_string(), identity.dns_seeds.join(", ")));
    }
    rows
}

/// Print the selected parameter set
pub fn print_params_summary(params: &ChainParams) {
    print_section("Chain Parameters");
    for (key, value) in params_summary(params) {
        print_kv(&key, &value);
    }
}
