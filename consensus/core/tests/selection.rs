use consensus_core::config::deployments::{BuriedDeployment, DeploymentPos};
use consensus_core::config::overrides::{MemoryOptions, TEST_ACTIVATION_HEIGHT_OPTION, VBPARAMS_OPTION};
use consensus_core::config::{params, select_params, try_params, ChainOverrides};
use consensus_core::errors::ParamsError;
use consensus_core::network::NetworkType;

// The active set is process-wide, so the whole lifecycle lives in one test.
#[test]
fn select_once_then_read_everywhere() {
    assert!(try_params().is_none());

    let args = MemoryOptions::new()
        .with(TEST_ACTIVATION_HEIGHT_OPTION, "segwit@500")
        .with(VBPARAMS_OPTION, "testdummy:100:200:50");
    let overrides = ChainOverrides::read(&args, NetworkType::Regtest).unwrap();

    let selected = select_params(NetworkType::Regtest, &overrides).unwrap();
    assert_eq!(selected.network(), NetworkType::Regtest);
    assert!(std::ptr::eq(selected, params()));

    assert_eq!(params().consensus().buried_height(BuriedDeployment::Segwit), 500);
    assert_eq!(params().consensus().deployment(DeploymentPos::TestDummy).start_time, 100);

    let err = select_params(NetworkType::Mainnet, &ChainOverrides::default()).unwrap_err();
    assert_eq!(err, ParamsError::AlreadySelected(NetworkType::Regtest));
    assert_eq!(params().network(), NetworkType::Regtest);

    let reader = std::thread::spawn(|| params().genesis_block().hash());
    assert_eq!(reader.join().unwrap(), params().genesis_block().hash());
}
