/// Number of base units in one coin
pub const COIN: u64 = 100_000_000;

/// Reward paid by the genesis coinbase
pub const INITIAL_BLOCK_REWARD: u64 = 50 * COIN;

/// Header version of the genesis block
pub const GENESIS_BLOCK_VERSION: i32 = 1;

/// Version of the genesis coinbase transaction
pub const GENESIS_TX_VERSION: i32 = 1;

/// Block subsidy halving interval (in blocks)
pub const SUBSIDY_HALVING_INTERVAL: u32 = 210_000;

/// Text committed into every genesis coinbase
pub const GENESIS_COINBASE_TEXT: &[u8] =
    b"From values, perception is born. From perception, judgment arises. From judgment, choice is made. From choice, destiny unfolds.";

/// Leading number pushed by the genesis input script (the compact bits of the
/// very first difficulty target)
pub const GENESIS_SCRIPT_BITS: i64 = 486_604_799;

/// Second number pushed by the genesis input script
pub const GENESIS_SCRIPT_EXTRA_NONCE: i64 = 4;

/// Heights at or above this value cannot be reached
pub const MAX_ACTIVATION_HEIGHT: u32 = i32::MAX as u32;
