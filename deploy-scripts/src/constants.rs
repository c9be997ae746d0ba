//! Constants used in the deploy script

/// The name of the contract deployed by the script
pub const CONTRACT_NAME: &str = "V3PositionHelper";

/// The number of seconds to wait after deployment before requesting
/// verification, giving the block explorer time to index the creation tx
pub const VERIFY_DELAY_SECS: u64 = 30;

/// The RPC URL used when none is configured
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The directory holding compilation artifacts, relative to the project root
pub const DEFAULT_ARTIFACTS_DIR: &str = "out";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The priority fee assumed when the node does not support
/// `eth_maxPriorityFeePerGas`, 1 gwei
pub const DEFAULT_PRIORITY_FEE_WEI: u128 = 1_000_000_000;

/// The multiple of the latest base fee budgeted into the max fee per gas
pub const BASE_FEE_MULTIPLIER: u128 = 2;

/// The unit in which per-gas fees are displayed
pub const FEE_DISPLAY_UNIT: &str = "gwei";

/// The extension of a Solidity source file, used as the artifact
/// directory suffix in the Foundry output layout
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of a JSON artifact file
pub const JSON_EXTENSION: &str = "json";

/// The name of the Foundry command
pub const FORGE_COMMAND: &str = "forge";

/// The name of the Foundry contract verification subcommand
pub const VERIFY_CONTRACT_COMMAND: &str = "verify-contract";

/// The message reported when the cost estimate could not be computed
pub const GAS_ESTIMATION_FAILED_MSG: &str = "Gas estimation failed. This can happen on some networks if the constructor would revert or simulation isn't supported.";

/// The message reported when the node exposes neither fee model
pub const NO_FEE_DATA_MSG: &str = "Could not determine gas price or fee data";
