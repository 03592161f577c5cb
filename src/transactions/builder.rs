//! Calldata for the pathway configuration calls.
//!
//! Wiring a source chain to a destination takes six calls on the source chain: four on the
//! endpoint (send library, send config, receive library, receive config) made by the OApp
//! delegate, and two on the OApp (peer, enforced options) made by the owner. Identical inputs
//! always produce byte-identical calldata.

use super::{OperationCategory, OptionsBuilder, PendingTransaction};
use crate::{
    chains::ChainConfig,
    constants::{
        ENFORCED_MSG_TYPE, EXECUTOR_CONFIG_TYPE, LZ_RECEIVE_GAS, LZ_RECEIVE_VALUE,
        MAX_MESSAGE_SIZE, RECEIVE_LIBRARY_GRACE_PERIOD, ULN_CONFIG_TYPE,
    },
    contracts::{
        EnforcedOptionParam, ExecutorConfig, ILayerZeroEndpointV2, IOApp, SetConfigParam,
        UlnConfig,
    },
    error::ConfigError,
};
use alloy::{
    primitives::{Address, B256, Bytes, U256},
    sol_types::{SolCall, SolValue},
};

/// Left pads an address to the 32 byte peer representation.
pub fn address_to_bytes32(address: Address) -> B256 {
    B256::left_padding_from(address.as_slice())
}

/// The enforced options applied to every destination.
pub fn enforced_options() -> Bytes {
    OptionsBuilder::new().add_executor_lz_receive_option(LZ_RECEIVE_GAS, LZ_RECEIVE_VALUE).build()
}

/// Builds the ULN configuration for a set of required DVNs.
pub fn uln_config(confirmations: u64, dvns: &[Address]) -> UlnConfig {
    UlnConfig {
        confirmations,
        requiredDVNCount: dvns.len() as u8,
        optionalDVNCount: 0,
        optionalDVNThreshold: 0,
        requiredDVNs: dvns.to_vec(),
        optionalDVNs: Vec::new(),
    }
}

/// Builds `setSendLibrary` and the send side `setConfig` for messages from `source` to `dest`.
///
/// The ULN config uses the confirmations of the destination.
pub fn build_send_settings(
    source: &ChainConfig,
    dest: &ChainConfig,
    oapp: Address,
) -> Result<[PendingTransaction; 2], ConfigError> {
    let confirmations = dest
        .confirmations
        .ok_or_else(|| ConfigError::MissingConfirmations { chain: dest.chain_key.clone() })?;

    let set_library = ILayerZeroEndpointV2::setSendLibraryCall {
        _oapp: oapp,
        _eid: dest.eid,
        _newLib: source.send_library,
    };

    let params = vec![
        SetConfigParam {
            eid: dest.eid,
            configType: EXECUTOR_CONFIG_TYPE,
            config: ExecutorConfig { maxMessageSize: MAX_MESSAGE_SIZE, executor: source.executor }
                .abi_encode()
                .into(),
        },
        SetConfigParam {
            eid: dest.eid,
            configType: ULN_CONFIG_TYPE,
            config: uln_config(confirmations, &source.dvns).abi_encode().into(),
        },
    ];
    let set_config = ILayerZeroEndpointV2::setConfigCall {
        _oapp: oapp,
        _lib: source.send_library,
        _params: params,
    };

    Ok([
        PendingTransaction::new(
            source.endpoint,
            set_library.abi_encode(),
            OperationCategory::Endpoint,
            format!("setSendLibrary({})", dest.chain_key),
        ),
        PendingTransaction::new(
            source.endpoint,
            set_config.abi_encode(),
            OperationCategory::Endpoint,
            format!("setConfig(send, {})", dest.chain_key),
        ),
    ])
}

/// Builds `setReceiveLibrary` and the receive side `setConfig` for messages from `dest`.
///
/// The ULN config uses the confirmations of the source.
pub fn build_receive_settings(
    source: &ChainConfig,
    dest: &ChainConfig,
    oapp: Address,
) -> Result<[PendingTransaction; 2], ConfigError> {
    let confirmations = source
        .confirmations
        .ok_or_else(|| ConfigError::MissingConfirmations { chain: source.chain_key.clone() })?;

    let set_library = ILayerZeroEndpointV2::setReceiveLibraryCall {
        _oapp: oapp,
        _eid: dest.eid,
        _newLib: source.receive_library,
        _gracePeriod: U256::from(RECEIVE_LIBRARY_GRACE_PERIOD),
    };

    let set_config = ILayerZeroEndpointV2::setConfigCall {
        _oapp: oapp,
        _lib: source.receive_library,
        _params: vec![SetConfigParam {
            eid: dest.eid,
            configType: ULN_CONFIG_TYPE,
            config: uln_config(confirmations, &source.dvns).abi_encode().into(),
        }],
    };

    Ok([
        PendingTransaction::new(
            source.endpoint,
            set_library.abi_encode(),
            OperationCategory::Endpoint,
            format!("setReceiveLibrary({})", dest.chain_key),
        ),
        PendingTransaction::new(
            source.endpoint,
            set_config.abi_encode(),
            OperationCategory::Endpoint,
            format!("setConfig(receive, {})", dest.chain_key),
        ),
    ])
}

/// Builds `setPeer` and `setEnforcedOptions` on the OApp for a destination.
pub fn build_peer_and_options(
    oapp: Address,
    dest: &ChainConfig,
    dest_token: Address,
) -> [PendingTransaction; 2] {
    let set_peer = IOApp::setPeerCall { _eid: dest.eid, _peer: address_to_bytes32(dest_token) };
    let set_options = IOApp::setEnforcedOptionsCall {
        _enforcedOptions: vec![EnforcedOptionParam {
            eid: dest.eid,
            msgType: ENFORCED_MSG_TYPE,
            options: enforced_options(),
        }],
    };

    [
        PendingTransaction::new(
            oapp,
            set_peer.abi_encode(),
            OperationCategory::Peer,
            format!("setPeer({})", dest.chain_key),
        ),
        PendingTransaction::new(
            oapp,
            set_options.abi_encode(),
            OperationCategory::Peer,
            format!("setEnforcedOptions({})", dest.chain_key),
        ),
    ]
}

/// Builds all six calls wiring `source` to `dest`, endpoint calls first.
pub fn build_wire_operation(
    source: &ChainConfig,
    dest: &ChainConfig,
    oapp: Address,
    dest_token: Address,
) -> Result<Vec<PendingTransaction>, ConfigError> {
    let mut txs = Vec::with_capacity(6);
    txs.extend(build_send_settings(source, dest, oapp)?);
    txs.extend(build_receive_settings(source, dest, oapp)?);
    txs.extend(build_peer_and_options(oapp, dest, dest_token));
    Ok(txs)
}

/// Builds `setDelegate` on the OApp.
pub fn build_set_delegate(oapp: Address, delegate: Address) -> PendingTransaction {
    PendingTransaction::new(
        oapp,
        IOApp::setDelegateCall { _delegate: delegate }.abi_encode(),
        OperationCategory::Peer,
        format!("setDelegate({delegate})"),
    )
}

/// Decodes an executor config blob.
pub fn decode_executor_config(config: &[u8]) -> Result<ExecutorConfig, alloy::sol_types::Error> {
    ExecutorConfig::abi_decode(config)
}

/// Decodes a ULN config blob.
pub fn decode_uln_config(config: &[u8]) -> Result<UlnConfig, alloy::sol_types::Error> {
    UlnConfig::abi_decode(config)
}
