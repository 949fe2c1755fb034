//! Assembly and process-wide selection of a network's parameter set.

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, info};

use super::checkpoints::CheckpointData;
use super::constants::{
    mainnet_identity, regtest_identity, signet_identity, signet_message_start, testnet4_identity, testnet_identity,
    DEFAULT_SIGNET_CHALLENGE, MAINNET_MESSAGE_START, REGTEST_MESSAGE_START, TESTNET4_MESSAGE_START, TESTNET_MESSAGE_START,
};
use super::genesis::{
    GenesisTemplate, MAINNET_GENESIS, MAINNET_GENESIS_COMMITMENT, REGTEST_GENESIS, SIGNET_GENESIS, TESTNET4_GENESIS, TESTNET_GENESIS,
};
use super::overrides::{ChainOverrides, RegTestOptions, SigNetOptions};
use super::params::{
    mainnet_consensus_params, regtest_consensus_params, signet_consensus_params, testnet4_consensus_params, testnet_consensus_params,
    ConsensusParams,
};
use crate::block::Block;
use crate::errors::{ParamsError, ParamsResult};
use crate::network::{MessageStart, NetworkIdentity, NetworkType};

/// The complete, immutable parameter set of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainParams {
    network: NetworkType,
    consensus: ConsensusParams,
    identity: NetworkIdentity,
    genesis: Block,
    checkpoints: CheckpointData,
    default_consistency_checks: bool,
    is_test_chain: bool,
    mine_blocks_on_demand: bool,
}

impl ChainParams {
    /// Builds the parameters for `network`, consulting only the overrides that
    /// apply to it.
    pub fn new(network: NetworkType, overrides: &ChainOverrides) -> Self {
        let params = match network {
            NetworkType::Mainnet => Self::main(),
            NetworkType::Testnet => Self::testnet(),
            NetworkType::Testnet4 => Self::testnet4(),
            NetworkType::Signet => Self::signet(&overrides.signet),
            NetworkType::Regtest => Self::regtest(&overrides.regtest),
        };
        debug_assert_eq!(params.consensus.validate(), Ok(()));
        params
    }

    /// # Panics
    ///
    /// If the constructed genesis does not reproduce the committed hash or
    /// merkle root. Running with a different genesis would silently follow a
    /// different chain.
    pub fn main() -> Self {
        let genesis = MAINNET_GENESIS.build();
        if let Err(err) = MAINNET_GENESIS_COMMITMENT.verify(NetworkType::Mainnet, &genesis) {
            panic!("{err}");
        }
        let checkpoints = single_checkpoint(&genesis);

        Self {
            network: NetworkType::Mainnet,
            consensus: mainnet_consensus_params(genesis.hash()),
            identity: mainnet_identity(),
            genesis,
            checkpoints,
            default_consistency_checks: false,
            is_test_chain: false,
            mine_blocks_on_demand: false,
        }
    }

    pub fn testnet() -> Self {
        let genesis = TESTNET_GENESIS.build();
        let checkpoints = single_checkpoint(&genesis);

        Self {
            network: NetworkType::Testnet,
            consensus: testnet_consensus_params(genesis.hash()),
            identity: testnet_identity(),
            genesis,
            checkpoints,
            default_consistency_checks: false,
            is_test_chain: true,
            mine_blocks_on_demand: false,
        }
    }

    /// Same rules as testnet plus the timewarp fix, with its own identity and
    /// genesis and no checkpoints yet
    pub fn testnet4() -> Self {
        let genesis = TESTNET4_GENESIS.build();
        let testnet = Self::testnet();

        Self {
            network: NetworkType::Testnet4,
            consensus: testnet4_consensus_params(genesis.hash()),
            identity: testnet4_identity(),
            genesis,
            checkpoints: CheckpointData::empty(),
            ..testnet
        }
    }

    pub fn signet(options: &SigNetOptions) -> Self {
        let genesis = SIGNET_GENESIS.build();

        // Checkpoints only describe the default signet's history
        let (challenge, checkpoints) = match &options.challenge {
            None => (DEFAULT_SIGNET_CHALLENGE.to_vec(), single_checkpoint(&genesis)),
            Some(custom) => {
                info!("Signet with challenge {}", hex::encode(custom));
                (custom.clone(), CheckpointData::empty())
            }
        };
        let dns_seeds = options.seeds.clone().unwrap_or_default();

        let mut consensus = signet_consensus_params(genesis.hash(), challenge);
        consensus.apply_version_bits(&options.version_bits_parameters);
        let identity = signet_identity(&consensus.signet_challenge, dns_seeds);

        Self {
            network: NetworkType::Signet,
            consensus,
            identity,
            genesis,
            checkpoints,
            default_consistency_checks: false,
            is_test_chain: true,
            mine_blocks_on_demand: false,
        }
    }

    /// Local test chain. A replacement genesis is accepted as-is: nothing is
    /// committed for this network.
    pub fn regtest(options: &RegTestOptions) -> Self {
        let template: GenesisTemplate = options.genesis.unwrap_or(REGTEST_GENESIS);
        let genesis = template.build();
        let checkpoints = single_checkpoint(&genesis);

        let mut consensus = regtest_consensus_params(genesis.hash());
        for (&dep, &height) in &options.activation_heights {
            consensus.set_buried_height(dep, height);
        }
        consensus.apply_version_bits(&options.version_bits_parameters);
        consensus.enforce_bip94 = options.enforce_bip94;

        Self {
            network: NetworkType::Regtest,
            consensus,
            identity: regtest_identity(options.fastprune),
            genesis,
            checkpoints,
            default_consistency_checks: true,
            is_test_chain: true,
            mine_blocks_on_demand: true,
        }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn consensus(&self) -> &ConsensusParams {
        &self.consensus
    }

    pub fn identity(&self) -> &NetworkIdentity {
        &self.identity
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    pub fn checkpoints(&self) -> &CheckpointData {
        &self.checkpoints
    }

    pub fn message_start(&self) -> MessageStart {
        self.identity.message_start
    }

    pub fn default_port(&self) -> u16 {
        self.identity.default_port
    }

    /// Whether expensive internal consistency checks default to on
    pub fn default_consistency_checks(&self) -> bool {
        self.default_consistency_checks
    }

    pub fn is_test_chain(&self) -> bool {
        self.is_test_chain
    }

    /// Whether blocks may be produced on request rather than by mining
    pub fn mine_blocks_on_demand(&self) -> bool {
        self.mine_blocks_on_demand
    }
}

fn single_checkpoint(genesis: &Block) -> CheckpointData {
    // A lone entry is always ordered
    CheckpointData::new(&[(0, genesis.hash())]).unwrap_or_default()
}

pub fn create_chain_params(network: NetworkType, overrides: &ChainOverrides) -> ChainParams {
    let params = ChainParams::new(network, overrides);
    debug!("Built {} parameters, genesis {}", network, params.genesis.hash());
    params
}

/// Holds a parameter set that may be filled exactly once
#[derive(Debug, Default)]
pub struct ParamsSlot(OnceCell<ChainParams>);

impl ParamsSlot {
    pub const fn new() -> Self {
        Self(OnceCell::new())
    }

    /// Stores `params`, or reports the network already held
    pub fn select(&self, params: ChainParams) -> ParamsResult<&ChainParams> {
        self.0.try_insert(params).map_err(|(current, _)| ParamsError::AlreadySelected(current.network))
    }

    pub fn get(&self) -> Option<&ChainParams> {
        self.0.get()
    }

    pub fn is_selected(&self) -> bool {
        self.0.get().is_some()
    }
}

static ACTIVE_PARAMS: ParamsSlot = ParamsSlot::new();

/// Builds and installs the process-wide parameter set. Call once at startup,
/// before anything reads [`params`].
pub fn select_params(network: NetworkType, overrides: &ChainOverrides) -> ParamsResult<&'static ChainParams> {
    if let Some(current) = ACTIVE_PARAMS.get() {
        return Err(ParamsError::AlreadySelected(current.network));
    }
    let params = create_chain_params(network, overrides);
    params.consensus.validate()?;
    let selected = ACTIVE_PARAMS.select(params)?;
    info!("Selected {} chain parameters", selected.network);
    Ok(selected)
}

/// The active parameter set.
///
/// # Panics
///
/// If [`select_params`] has not run yet.
pub fn params() -> &'static ChainParams {
    match ACTIVE_PARAMS.get() {
        Some(params) => params,
        None => panic!("chain parameters read before select_params"),
    }
}

pub fn try_params() -> Option<&'static ChainParams> {
    ACTIVE_PARAMS.get()
}

/// Magic of every network a peer may announce; signet uses the default challenge
pub fn known_message_starts() -> [(NetworkType, MessageStart); 5] {
    [
        (NetworkType::Mainnet, MAINNET_MESSAGE_START),
        (NetworkType::Testnet, TESTNET_MESSAGE_START),
        (NetworkType::Testnet4, TESTNET4_MESSAGE_START),
        (NetworkType::Signet, signet_message_start(&DEFAULT_SIGNET_CHALLENGE)),
        (NetworkType::Regtest, REGTEST_MESSAGE_START),
    ]
}

pub fn identify_by_magic(bytes: &[u8]) -> Option<NetworkType> {
    known_message_starts().into_iter().find(|(_, magic)| magic.as_slice() == bytes).map(|(network, _)| network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::deployments::{BuriedDeployment, DeploymentPos, VersionBitsDeployment};
    use crate::config::overrides::VersionBitsOverride;
    use crate::pow;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn create_is_deterministic() {
        let overrides = ChainOverrides::default();
        for network in NetworkType::iter() {
            let a = create_chain_params(network, &overrides);
            let b = create_chain_params(network, &overrides);
            assert_eq!(a.genesis_block().serialize(), b.genesis_block().serialize());
            assert_eq!(a.genesis_block().hash(), b.genesis_block().hash());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn genesis_hashes_per_network() {
        let expected = [
            (NetworkType::Mainnet, "0000e314b287500c1ab53d85a2b6f90df65f9dff17ead5e8fdad417ca47bcfd8"),
            (NetworkType::Testnet, "00004814b4a77fea0e6cfb31a97e8481e2b4e396c4ef204c970c9dfc7c6a99e6"),
            (NetworkType::Testnet4, "0000a8a17ee8a67b06d00d965c61902d2fc4c2d1fec4fccda7349be84b9ee3c9"),
            (NetworkType::Signet, "0000024801d2575749102d7992c7f3d7568aa2c331ed3c790b5d2e7feb8e44d3"),
            (NetworkType::Regtest, "7663ede33920bfce6766522ed9fa89a43b20c5d3aef6536824201fdd8743e348"),
        ];
        for (network, hash) in expected {
            let params = create_chain_params(network, &ChainOverrides::default());
            assert_eq!(params.genesis_block().hash().to_string(), hash, "{network}");
            assert_eq!(params.consensus().hash_genesis_block, params.genesis_block().hash());
            assert!(pow::check_proof_of_work(
                &params.genesis_block().hash(),
                params.genesis_block().header.bits,
                params.consensus().pow_limit
            ));
        }
    }

    #[test]
    fn all_networks_share_the_coinbase() {
        let main = ChainParams::main();
        for network in NetworkType::iter() {
            let params = create_chain_params(network, &ChainOverrides::default());
            assert_eq!(params.genesis_block().header.hash_merkle_root, main.genesis_block().header.hash_merkle_root);
        }
    }

    #[test]
    fn magics_are_distinct_and_identified() {
        let magics: HashSet<_> = known_message_starts().iter().map(|(_, m)| *m).collect();
        assert_eq!(magics.len(), 5);
        for network in NetworkType::iter() {
            let params = create_chain_params(network, &ChainOverrides::default());
            assert_eq!(identify_by_magic(&params.message_start()), Some(network));
        }
        assert_eq!(identify_by_magic(&[0xda, 0x9e, 0xb5, 0xda]), Some(NetworkType::Mainnet));
        assert_eq!(identify_by_magic(&[0xde, 0xad, 0xbe, 0xef]), None);
        assert_eq!(identify_by_magic(&[0xda, 0x9e, 0xb5]), None);
    }

    #[test]
    fn ports_are_distinct() {
        let ports: HashSet<_> =
            NetworkType::iter().map(|n| create_chain_params(n, &ChainOverrides::default()).default_port()).collect();
        assert_eq!(ports.len(), 5);
    }

    #[test]
    fn main_ignores_overrides() {
        let mut overrides = ChainOverrides::default();
        overrides.regtest.activation_heights.insert(BuriedDeployment::Segwit, 500);
        overrides.signet.challenge = Some(vec![0x51]);
        assert_eq!(ChainParams::new(NetworkType::Mainnet, &overrides), ChainParams::main());
        assert_eq!(ChainParams::new(NetworkType::Testnet, &overrides), ChainParams::testnet());
    }

    #[test]
    fn testnet4_derives_from_testnet() {
        let testnet = ChainParams::testnet();
        let testnet4 = ChainParams::testnet4();
        assert_ne!(testnet.message_start(), testnet4.message_start());
        assert_ne!(testnet.default_port(), testnet4.default_port());
        assert_eq!(testnet.identity().bech32_hrp, testnet4.identity().bech32_hrp);
        assert_eq!(testnet.is_test_chain(), testnet4.is_test_chain());
        assert!(testnet4.checkpoints().is_empty());
        assert!(!testnet.checkpoints().is_empty());
        assert!(testnet4.consensus().enforce_bip94);
    }

    #[test]
    fn regtest_applies_overrides() {
        let mut options = RegTestOptions { fastprune: true, enforce_bip94: true, ..Default::default() };
        options.activation_heights.insert(BuriedDeployment::Segwit, 500);
        options.version_bits_parameters.insert(
            DeploymentPos::TestDummy,
            VersionBitsOverride { deployment: DeploymentPos::TestDummy, start_time: 100, timeout: 200, min_activation_height: 50 },
        );
        let params = ChainParams::regtest(&options);
        assert_eq!(params.consensus().segwit_height, 500);
        assert_eq!(params.consensus().csv_height, 1);
        let dummy = params.consensus().deployment(DeploymentPos::TestDummy);
        assert_eq!((dummy.start_time, dummy.timeout, dummy.min_activation_height), (100, 200, 50));
        assert!(params.consensus().deployment(DeploymentPos::Taproot).is_always_active());
        assert_eq!(params.identity().prune_after_height, 100);
        assert!(params.consensus().enforce_bip94);
        assert!(params.mine_blocks_on_demand());
    }

    #[test]
    fn regtest_accepts_any_genesis_literals() {
        for (timestamp, nonce, bits) in [(0u32, 0u32, 0x207fffffu32), (1, 12345, 0x1d00ffff), (u32::MAX, u32::MAX, 0)] {
            let options = RegTestOptions { genesis: Some(GenesisTemplate::new(timestamp, nonce, bits)), ..Default::default() };
            let params = ChainParams::regtest(&options);
            assert_eq!(params.genesis_block().header.nonce, nonce);
            assert_eq!(params.checkpoints().get(0), Some(&params.genesis_block().hash()));
        }
    }

    #[test]
    fn default_signet() {
        let params = ChainParams::signet(&SigNetOptions::default());
        assert!(params.consensus().signet_blocks);
        assert_eq!(params.consensus().signet_challenge, DEFAULT_SIGNET_CHALLENGE.to_vec());
        assert_eq!(params.message_start(), [0x0a, 0x03, 0xcf, 0x40]);
        assert_eq!(params.checkpoints().len(), 1);
        assert!(params.identity().dns_seeds.is_empty());
        for pos in DeploymentPos::ALL {
            assert!(params.consensus().deployment(pos).is_never_active());
        }

        let seeded = ChainParams::signet(&SigNetOptions { seeds: Some(vec!["10.0.0.1".to_string()]), ..Default::default() });
        assert_eq!(seeded.identity().dns_seeds, vec!["10.0.0.1".to_string()]);
        assert_eq!(seeded.message_start(), params.message_start());
        assert_eq!(seeded.checkpoints(), params.checkpoints());
    }

    #[test]
    fn custom_signet() {
        let mut version_bits_parameters = BTreeMap::new();
        version_bits_parameters.insert(
            DeploymentPos::Taproot,
            VersionBitsOverride {
                deployment: DeploymentPos::Taproot,
                start_time: VersionBitsDeployment::ALWAYS_ACTIVE,
                timeout: VersionBitsDeployment::NO_TIMEOUT,
                min_activation_height: 0,
            },
        );
        let options = SigNetOptions {
            challenge: Some(vec![0x51]),
            seeds: Some(vec!["seed.example:38555".to_string()]),
            version_bits_parameters,
        };
        let params = ChainParams::signet(&options);
        assert_eq!(params.consensus().signet_challenge, vec![0x51]);
        assert_eq!(params.message_start(), [0x54, 0xd2, 0x6f, 0xbd]);
        assert_eq!(identify_by_magic(&params.message_start()), None);
        assert_eq!(params.identity().dns_seeds, vec!["seed.example:38555".to_string()]);
        assert!(params.checkpoints().is_empty());
        assert!(params.consensus().deployment(DeploymentPos::Taproot).is_always_active());
        assert!(params.consensus().deployment(DeploymentPos::TestDummy).is_never_active());
    }

    #[test]
    fn slot_is_one_shot() {
        let slot = ParamsSlot::new();
        assert!(!slot.is_selected());
        assert!(slot.get().is_none());
        let selected = slot.select(ChainParams::regtest(&RegTestOptions::default())).unwrap();
        assert_eq!(selected.network(), NetworkType::Regtest);
        assert_eq!(slot.select(ChainParams::testnet()), Err(ParamsError::AlreadySelected(NetworkType::Regtest)));
        assert_eq!(slot.get().map(ChainParams::network), Some(NetworkType::Regtest));
    }

    #[test]
    fn every_network_passes_validation() {
        for network in NetworkType::iter() {
            assert_eq!(create_chain_params(network, &ChainOverrides::default()).consensus().validate(), Ok(()));
        }
    }
}
