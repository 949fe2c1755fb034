//! Consensus core: the data model of blocks and transactions as far as a
//! genesis needs it, and the per-network parameter sets built from it.
//!
//! Nodes pick a network once at startup with [`config::select_params`] and
//! read the result through [`config::params`] from then on.

pub mod block;
pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod header;
pub mod network;
pub mod pow;
pub mod script;
pub mod tx;

pub use crypto_hashes::Hash;
