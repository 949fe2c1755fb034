use consensus_core::config::deployments::{BuriedDeployment, DeploymentPos};
use consensus_core::config::{create_chain_params, params, ChainOverrides};
use consensus_core::network::NetworkType;
use destinyd::config::ConfigError;
use destinyd::{load_config, params_json, select_configured_params, Args, Config, NodeError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const REGTEST_CONFIG: &str = r#"
network = "regtest"

[chain]
testactivationheight = ["segwit@500", "cltv@7"]
vbparams = ["testdummy:100:200:50"]
fastprune = true
"#;

#[test]
fn regtest_from_config_file() {
    let file = write_config(REGTEST_CONFIG);
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.network_type().unwrap(), NetworkType::Regtest);

    let overrides = ChainOverrides::read(&config, NetworkType::Regtest).unwrap();
    let params = create_chain_params(NetworkType::Regtest, &overrides);
    assert_eq!(params.consensus().buried_height(BuriedDeployment::Segwit), 500);
    assert_eq!(params.consensus().buried_height(BuriedDeployment::Cltv), 7);
    assert_eq!(params.consensus().deployment(DeploymentPos::TestDummy).min_activation_height, 50);
    assert_eq!(params.identity().prune_after_height, 100);
}

#[test]
fn command_line_wins_over_file() {
    let file = write_config(REGTEST_CONFIG);
    let args = Args {
        config_path: Some(file.path().to_path_buf()),
        test_activation_height: vec!["segwit@9".to_string()],
        ..Default::default()
    };
    let config = load_config(&args).unwrap();
    let overrides = ChainOverrides::read(&config, NetworkType::Regtest).unwrap();
    let params = create_chain_params(NetworkType::Regtest, &overrides);
    assert_eq!(params.consensus().buried_height(BuriedDeployment::Segwit), 9);
    assert_eq!(params.consensus().buried_height(BuriedDeployment::Cltv), 1);
}

#[test]
fn malformed_file_is_reported() {
    let file = write_config("network = [");
    assert!(matches!(load_config(&Args { config_path: Some(file.path().to_path_buf()), ..Default::default() }), Err(NodeError::Config(_))));
}

#[test]
fn missing_named_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(Config::load(&missing), Err(ConfigError::Read { .. })));

    let args = Args { config_path: Some(missing), chain: Some("regtest".to_string()), ..Default::default() };
    assert!(matches!(load_config(&args), Err(NodeError::Config(ConfigError::Read { .. }))));
}

#[test]
fn no_config_file_means_defaults() {
    let config = load_config(&Args::default()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.network_type().unwrap(), NetworkType::Mainnet);
}

// The only test in this binary that touches the process-wide selection
#[test]
fn selects_signet_from_file() {
    let file = write_config("network = \"signet\"\n[chain]\nsignetchallenge = [\"51\"]\nsignetseednode = [\"10.0.0.1:38555\"]\n");
    let config = load_config(&Args { config_path: Some(file.path().to_path_buf()), ..Default::default() }).unwrap();

    let selected = select_configured_params(&config).unwrap();
    assert_eq!(selected.network(), NetworkType::Signet);
    assert_eq!(params().consensus().signet_challenge, vec![0x51]);
    assert_eq!(params().message_start(), [0x54, 0xd2, 0x6f, 0xbd]);

    let json: serde_json::Value = serde_json::from_str(&params_json(params()).unwrap()).unwrap();
    assert_eq!(json["network"], "signet");
    assert_eq!(json["identity"]["dns_seeds"][0], "10.0.0.1:38555");

    assert!(matches!(select_configured_params(&config), Err(NodeError::Params(_))));
}

#[test]
fn bad_override_is_rejected_before_selection() {
    let config = Config {
        network: Some("regtest".to_string()),
        chain: destinyd::config::ChainConfig { vbparams: vec!["taproot:1".to_string()], ..Default::default() },
    };
    assert!(matches!(ChainOverrides::read(&config, NetworkType::Regtest), Err(_)));
}
