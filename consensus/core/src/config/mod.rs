pub mod checkpoints;
pub mod constants;
pub mod deployments;
pub mod genesis;
pub mod overrides;
pub mod params;
pub mod registry;

pub use checkpoints::CheckpointData;
pub use genesis::{build_genesis, GenesisTemplate};
pub use overrides::{ChainOverrides, OptionSource, RegTestOptions, SigNetOptions};
pub use params::ConsensusParams;
pub use registry::{create_chain_params, identify_by_magic, params, select_params, try_params, ChainParams, ParamsSlot};
