//! Wiring constants.

use alloy::primitives::{Address, address};

/// The LayerZero protocol major version that is wired.
pub const PROTOCOL_VERSION: u8 = 2;

/// Maximum message size configured for the executor on every pathway.
pub const MAX_MESSAGE_SIZE: u32 = 10_000;

/// Gas forwarded to `lzReceive` on the destination chain by the enforced options.
pub const LZ_RECEIVE_GAS: u128 = 300_000;

/// Native value forwarded to `lzReceive` by the enforced options.
pub const LZ_RECEIVE_VALUE: u128 = 0;

/// Message type the enforced options apply to.
pub const ENFORCED_MSG_TYPE: u16 = 2;

/// `setConfig` config type for the executor configuration.
pub const EXECUTOR_CONFIG_TYPE: u32 = 1;

/// `setConfig` config type for the ULN configuration.
pub const ULN_CONFIG_TYPE: u32 = 2;

/// Grace period passed to `setReceiveLibrary`.
///
/// Zero switches the receive library immediately.
pub const RECEIVE_LIBRARY_GRACE_PERIOD: u64 = 0;

/// Number of block confirmations awaited after each direct transaction.
pub const NUM_BLOCKS_TO_WAIT: u64 = 2;

/// Canonical name of the DVN required on every chain.
pub const DEFAULT_REQUIRED_DVN: &str = "LayerZero Labs";

/// Canonical name of the additional DVN required on mainnet chains.
pub const DEFAULT_REQUIRED_MAINNET_DVN: &str = "Horizen";

/// Stage name of mainnet deployments in the LayerZero metadata.
pub const MAINNET_STAGE: &str = "mainnet";

/// `MultiSendCallOnly` v1.4.1, deployed at the same address on every supported chain.
pub const MULTI_SEND_CALL_ONLY: Address = address!("0x9641d764fc13c8B624c04430C7356C1C7C8102e2");

/// Base URL of the hosted Safe Transaction Service.
pub const SAFE_SERVICE_BASE_URL: &str = "https://api.safe.global/tx-service";

/// Base URL of the Safe web interface, used for log output.
pub const SAFE_APP_URL: &str = "https://app.safe.global";
