use clap::Parser;
use consensus_core::config::genesis::{GenesisTemplate, MAINNET_GENESIS};
use consensus_core::pow;
use std::time::Instant;

/// Builds a genesis block from literal header fields, optionally mining a nonce.
#[derive(Parser, Debug)]
#[command(name = "genesis_tool")]
struct Opts {
    /// Header timestamp (seconds)
    #[arg(long, default_value_t = MAINNET_GENESIS.timestamp)]
    time: u32,

    /// Compact difficulty target. Accepts decimal or 0x-prefixed hex.
    #[arg(long, value_parser = parse_bits, default_value = "0x1f00ffff")]
    bits: u32,

    /// Header nonce, the starting point when mining
    #[arg(long, default_value_t = MAINNET_GENESIS.nonce)]
    nonce: u32,

    /// Coinbase output value in base units
    #[arg(long, default_value_t = MAINNET_GENESIS.reward)]
    reward: u64,

    /// Search for a nonce meeting the target
    #[arg(long)]
    mine: bool,

    /// Maximum nonces to try when mining
    #[arg(long, default_value_t = 10_000_000u64)]
    max_iterations: u64,

    /// Print the serialized block as hex
    #[arg(long)]
    hex: bool,
}

fn parse_bits(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid bits '{}': {}", s, e))
}

fn main() {
    let opts = Opts::parse();

    let template = GenesisTemplate { timestamp: opts.time, nonce: opts.nonce, bits: opts.bits, reward: opts.reward, ..MAINNET_GENESIS };
    let mut genesis = template.build();

    let Some(target) = pow::compact_to_target(opts.bits) else {
        eprintln!("Bits 0x{:08x} do not encode a valid target", opts.bits);
        std::process::exit(1);
    };

    if opts.mine {
        println!("Starting one-shot mine (max_iterations={})...", opts.max_iterations);
        let start = Instant::now();
        let mut found = false;
        for tried in 0..opts.max_iterations {
            if pow::check_proof_of_work(&genesis.header.hash, opts.bits, target) {
                found = true;
                break;
            }
            genesis.header.nonce = genesis.header.nonce.wrapping_add(1);
            genesis.header.finalize();
            if tried > 0 && tried % 1_000_000 == 0 {
                let rate = tried as f64 / start.elapsed().as_secs_f64().max(1e-6);
                println!("Tried {} nonces (rate {:.2} kH/s)", tried, rate / 1000.0);
            }
        }

        let elapsed = start.elapsed();
        if found {
            println!("Found valid nonce {} in {:.2}s", genesis.header.nonce, elapsed.as_secs_f64());
        } else {
            eprintln!("Failed to find a valid nonce within {} iterations (elapsed {:.2}s)", opts.max_iterations, elapsed.as_secs_f64());
        }
    }

    let meets_target = pow::check_proof_of_work(&genesis.header.hash, opts.bits, target);
    println!("Genesis hash: {}", genesis.header.hash);
    println!("Merkle root: {}", genesis.header.hash_merkle_root);
    println!("Timestamp: {}", genesis.header.timestamp);
    println!("Bits: 0x{:08x}", genesis.header.bits);
    println!("Nonce: {}", genesis.header.nonce);
    println!("Reward: {}", opts.reward);
    println!("Meets target: {}", meets_target);

    if opts.hex {
        println!("Serialized genesis (hex): {}", hex::encode(genesis.serialize()));
    }
}
