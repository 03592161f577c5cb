//! LayerZero pathway diagnostics.
//!
//! Reads the configuration of a wired pathway back from the endpoint and the OApp and compares
//! it with what a wiring run would set.

use crate::{
    chains::ChainConfig,
    constants::{ENFORCED_MSG_TYPE, EXECUTOR_CONFIG_TYPE, MAX_MESSAGE_SIZE, ULN_CONFIG_TYPE},
    contracts::{
        ExecutorConfig,
        ILayerZeroEndpointV2::{
            self, getReceiveLibraryCall, getReceiveLibraryReturn, getSendLibraryCall,
        },
        IOApp::{self, enforcedOptionsCall, peersCall},
        UlnConfig,
    },
    transactions::{
        address_to_bytes32, decode_executor_config, decode_uln_config, enforced_options,
    },
};
use alloy::{
    primitives::{Address, B256, Bytes},
    providers::{CallItem, DynProvider, Failure, Provider},
};
use tracing::info;

/// Diagnostics of a single source to destination pathway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathwayDiagnostics {
    /// Destination chain key.
    pub destination: String,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

/// On-chain state of a pathway.
#[derive(Debug, Clone, Default)]
pub struct PathwayState {
    /// Send library used by the OApp.
    pub send_library: Option<Address>,
    /// Receive library used by the OApp, and whether it is the endpoint default.
    pub receive_library: Option<(Address, bool)>,
    /// Executor config of the send library.
    pub executor_config: Option<ExecutorConfig>,
    /// ULN config of the send library.
    pub send_uln: Option<UlnConfig>,
    /// ULN config of the receive library.
    pub receive_uln: Option<UlnConfig>,
    /// Configured peer.
    pub peer: Option<B256>,
    /// Enforced options for the wired message type.
    pub enforced_options: Option<Bytes>,
}

/// Check the pathway from `source` to `dest` on the source chain.
pub async fn inspect_pathway(
    provider: &DynProvider,
    source: &ChainConfig,
    dest: &ChainConfig,
    oapp: Address,
) -> PathwayDiagnostics {
    let mut diagnostics =
        PathwayDiagnostics { destination: dest.chain_key.clone(), ..Default::default() };

    info!(
        source = %source.chain_key,
        destination = %dest.chain_key,
        dst_eid = dest.eid,
        "Inspecting LayerZero pathway"
    );

    let ctx = PathwayContext { provider, source, dest, oapp };
    match ctx.fetch_state(&mut diagnostics.errors).await {
        Ok(state) => ctx.evaluate(&state, &mut diagnostics.warnings, &mut diagnostics.errors),
        Err(err) => diagnostics.errors.push(format!(
            "Failed to read pathway {} -> {}: {err}",
            source.chain_key, dest.chain_key
        )),
    }
    diagnostics
}

/// Helper struct to hold context for checking a pathway.
struct PathwayContext<'a> {
    provider: &'a DynProvider,
    source: &'a ChainConfig,
    dest: &'a ChainConfig,
    oapp: Address,
}

impl PathwayContext<'_> {
    /// Reads libraries, peer and options in one multicall, then the configs of the libraries.
    async fn fetch_state(&self, errors: &mut Vec<String>) -> eyre::Result<PathwayState> {
        let endpoint = ILayerZeroEndpointV2::new(self.source.endpoint, self.provider);
        let oapp = IOApp::new(self.oapp, self.provider);

        let (send_library, receive_library, peer, options) = self
            .provider
            .multicall()
            .add_call::<getSendLibraryCall>(
                CallItem::from(endpoint.getSendLibrary(self.oapp, self.dest.eid))
                    .allow_failure(true),
            )
            .add_call::<getReceiveLibraryCall>(
                CallItem::from(endpoint.getReceiveLibrary(self.oapp, self.dest.eid))
                    .allow_failure(true),
            )
            .add_call::<peersCall>(CallItem::from(oapp.peers(self.dest.eid)).allow_failure(true))
            .add_call::<enforcedOptionsCall>(
                CallItem::from(oapp.enforcedOptions(self.dest.eid, ENFORCED_MSG_TYPE))
                    .allow_failure(true),
            )
            .aggregate3()
            .await?;

        let mut state = PathwayState {
            send_library: self.ok_or_log("getSendLibrary", send_library, errors),
            receive_library: self
                .ok_or_log("getReceiveLibrary", receive_library, errors)
                .map(|ret: getReceiveLibraryReturn| (ret.lib, ret.isDefault)),
            peer: self.ok_or_log("peers", peer, errors),
            enforced_options: self.ok_or_log("enforcedOptions", options, errors),
            ..Default::default()
        };

        if let Some(library) = state.send_library {
            state.executor_config = self
                .fetch_config(
                    library,
                    EXECUTOR_CONFIG_TYPE,
                    "executor",
                    decode_executor_config,
                    errors,
                )
                .await;
            state.send_uln = self
                .fetch_config(library, ULN_CONFIG_TYPE, "send ULN", decode_uln_config, errors)
                .await;
        }
        if let Some((library, _)) = state.receive_library {
            state.receive_uln = self
                .fetch_config(library, ULN_CONFIG_TYPE, "receive ULN", decode_uln_config, errors)
                .await;
        }

        Ok(state)
    }

    fn ok_or_log<T>(
        &self,
        call: &str,
        result: Result<T, Failure>,
        errors: &mut Vec<String>,
    ) -> Option<T> {
        result
            .map_err(|err| {
                errors.push(format!(
                    "{call} failed for {} -> {}: {err}",
                    self.source.chain_key, self.dest.chain_key
                ))
            })
            .ok()
    }

    async fn fetch_config<T>(
        &self,
        library: Address,
        config_type: u32,
        name: &str,
        decode: fn(&[u8]) -> Result<T, alloy::sol_types::Error>,
        errors: &mut Vec<String>,
    ) -> Option<T> {
        let endpoint = ILayerZeroEndpointV2::new(self.source.endpoint, self.provider);
        let Ok(config) =
            endpoint.getConfig(self.oapp, library, self.dest.eid, config_type).call().await
        else {
            errors.push(format!(
                "Failed to fetch {name} config for {} -> {}",
                self.source.chain_key, self.dest.chain_key
            ));
            return None;
        };

        let Ok(config) = decode(&config) else {
            errors.push(format!(
                "Failed to decode {name} config for {} -> {}",
                self.source.chain_key, self.dest.chain_key
            ));
            return None;
        };
        Some(config)
    }

    /// Compare the on-chain state with what wiring sets.
    fn evaluate(&self, state: &PathwayState, warnings: &mut Vec<String>, errors: &mut Vec<String>) {
        let pathway = format!("{} -> {}", self.source.chain_key, self.dest.chain_key);

        if let Some(library) = state.send_library
            && library != self.source.send_library
        {
            errors.push(format!(
                "Send library for {pathway} is {library}, expected {}",
                self.source.send_library
            ));
        }

        if let Some((library, is_default)) = state.receive_library {
            if library != self.source.receive_library {
                errors.push(format!(
                    "Receive library for {pathway} is {library}, expected {}",
                    self.source.receive_library
                ));
            } else if is_default {
                warnings.push(format!(
                    "Receive library for {pathway} is only the endpoint default, it was never set"
                ));
            }
        }

        if let Some(config) = &state.executor_config {
            let expected =
                ExecutorConfig { maxMessageSize: MAX_MESSAGE_SIZE, executor: self.source.executor };
            if *config != expected {
                errors.push(format!(
                    "Executor config for {pathway} is {config:?}, expected {expected:?}"
                ));
            }
        }

        if let Some(uln) = &state.send_uln {
            validate_uln_config(&format!("send {pathway}"), uln, warnings, errors);
            self.compare_uln("Send", &pathway, uln, self.dest.confirmations, errors);
        }
        if let Some(uln) = &state.receive_uln {
            validate_uln_config(&format!("receive {pathway}"), uln, warnings, errors);
            self.compare_uln("Receive", &pathway, uln, self.source.confirmations, errors);
        }

        if let (Some(peer), Some(token)) = (state.peer, self.dest.token) {
            let expected = address_to_bytes32(token);
            if peer.is_zero() {
                errors.push(format!("No peer set for {pathway}"));
            } else if peer != expected {
                errors.push(format!("Peer for {pathway} is {peer}, expected {expected}"));
            } else {
                info!(pathway = %pathway, %peer, "Peer configured correctly");
            }
        }

        if let Some(options) = &state.enforced_options {
            let expected = enforced_options();
            if options.is_empty() {
                errors.push(format!("No enforced options set for {pathway}"));
            } else if *options != expected {
                warnings.push(format!(
                    "Enforced options for {pathway} are {options}, expected {expected}"
                ));
            }
        }
    }

    fn compare_uln(
        &self,
        side: &str,
        pathway: &str,
        uln: &UlnConfig,
        confirmations: Option<u64>,
        errors: &mut Vec<String>,
    ) {
        if let Some(confirmations) = confirmations
            && uln.confirmations != confirmations
        {
            errors.push(format!(
                "{side} ULN config for {pathway} has {} confirmations, expected {confirmations}",
                uln.confirmations
            ));
        }
        if !self.source.dvns.is_empty() && uln.requiredDVNs != self.source.dvns {
            errors.push(format!(
                "{side} ULN config for {pathway} requires DVNs {:?}, expected {:?}",
                uln.requiredDVNs, self.source.dvns
            ));
        }
    }
}

/// Validate ULN configuration settings.
fn validate_uln_config(
    pathway: &str,
    uln_config: &UlnConfig,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    if uln_config.confirmations == 0 {
        warnings.push(format!("ULN config has 0 confirmations for {pathway}"));
    }

    if uln_config.requiredDVNCount == 0 && uln_config.optionalDVNCount == 0 {
        errors.push(format!("ULN config has no DVNs configured for {pathway}"));
    }

    if uln_config.requiredDVNs.len() != uln_config.requiredDVNCount as usize {
        errors.push(format!(
            "ULN config DVN count mismatch for {pathway}: expected {} required DVNs but found {}",
            uln_config.requiredDVNCount,
            uln_config.requiredDVNs.len()
        ));
    }

    for (i, dvn) in uln_config.requiredDVNs.iter().enumerate() {
        if dvn.is_zero() {
            errors.push(format!("ULN config has zero address for required DVN {i} for {pathway}"));
        }
    }
}
