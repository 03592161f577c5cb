//! Per-chain wiring configuration derived from the metadata and the token registry.

use crate::{
    config::{MissingAddressPolicy, RequiredDvns, TokenDeployment},
    error::ConfigError,
    metadata::{AddressRecord, ChainMetadata, Deployment, MetadataTable},
};
use alloy::primitives::{Address, ChainId};
use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};
use strum::Display;
use tracing::{debug, info, warn};

/// The two message libraries of a pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LibraryKind {
    /// The send library.
    Send,
    /// The receive library.
    Receive,
}

/// Everything needed to wire a single chain.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// The chain key in the metadata.
    pub chain_key: String,
    /// The LayerZero endpoint id.
    pub eid: u32,
    /// The EVM chain id.
    pub native_chain_id: ChainId,
    /// The endpoint contract.
    pub endpoint: Address,
    /// The executor contract.
    pub executor: Address,
    /// The ULN302 send library.
    pub send_library: Address,
    /// The ULN302 receive library.
    pub receive_library: Address,
    /// Required DVNs, sorted by address and deduplicated.
    ///
    /// Empty when validators were not resolved.
    pub dvns: Vec<Address>,
    /// The deployed token, if any.
    pub token: Option<Address>,
    /// Block confirmations required for messages sent from this chain.
    pub confirmations: Option<u64>,
    /// Whether this is a mainnet chain.
    pub is_mainnet: bool,
}

fn expected_dvn_count(is_mainnet: bool) -> usize {
    if is_mainnet { 2 } else { 1 }
}

/// Built chain configurations keyed by chain key.
#[derive(Debug, Clone, Default)]
pub struct ChainConfigs(BTreeMap<String, ChainConfig>);

impl ChainConfigs {
    /// Returns the configuration of a chain.
    pub fn get(&self, chain_key: &str) -> Option<&ChainConfig> {
        self.0.get(chain_key)
    }

    /// Returns the configuration of the chain with the given EVM chain id.
    pub fn by_chain_id(&self, chain_id: ChainId) -> Option<&ChainConfig> {
        self.0.values().find(|config| config.native_chain_id == chain_id)
    }

    /// Adds a configuration, replacing any previous one for the same chain key.
    pub fn insert(&mut self, config: ChainConfig) {
        self.0.insert(config.chain_key.clone(), config);
    }

    /// Iterates over configurations in chain key order.
    pub fn iter(&self) -> impl Iterator<Item = &ChainConfig> {
        self.0.values()
    }

    /// Number of configured chains.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no chain is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Logs one line per configured chain.
    pub fn log_summary(&self) {
        info!(chains = self.len(), "Chain configurations");
        for config in self.iter() {
            info!(
                chain = %config.chain_key,
                chain_id = config.native_chain_id,
                eid = config.eid,
                mainnet = config.is_mainnet,
                endpoint = %config.endpoint,
                executor = %config.executor,
                send_library = %config.send_library,
                receive_library = %config.receive_library,
                dvns = ?config.dvns,
                token = ?config.token,
                confirmations = ?config.confirmations,
                "Chain"
            );
        }
    }
}

impl FromIterator<ChainConfig> for ChainConfigs {
    fn from_iter<T: IntoIterator<Item = ChainConfig>>(iter: T) -> Self {
        let mut configs = Self::default();
        for config in iter {
            configs.insert(config);
        }
        configs
    }
}

/// Derives [`ChainConfig`]s from chain metadata.
///
/// Builds never touch the network.
#[derive(Debug, Clone, Default)]
pub struct ChainConfigBuilder {
    tokens: BTreeMap<ChainId, TokenDeployment>,
    required_dvns: RequiredDvns,
    policy: MissingAddressPolicy,
}

impl ChainConfigBuilder {
    /// Creates a builder with the given token registry.
    pub fn new(tokens: BTreeMap<ChainId, TokenDeployment>) -> Self {
        Self { tokens, ..Default::default() }
    }

    /// Sets the canonical DVN names to require.
    pub fn with_required_dvns(mut self, required_dvns: RequiredDvns) -> Self {
        self.required_dvns = required_dvns;
        self
    }

    /// Sets how chains without an endpoint or executor are handled.
    pub fn with_missing_address_policy(mut self, policy: MissingAddressPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the configuration of every chain in the table.
    ///
    /// Chains without a usable deployment are left out.
    pub fn build_all(
        &self,
        metadata: &MetadataTable,
        include_validators: bool,
    ) -> Result<ChainConfigs, ConfigError> {
        let mut configs = ChainConfigs::default();
        for (chain_key, chain) in metadata.iter() {
            if let Some(config) = self.build(chain_key, chain, include_validators)? {
                configs.insert(config);
            }
        }
        debug!(chains = configs.len(), include_validators, "Built chain configurations");
        Ok(configs)
    }

    /// Builds the configuration of a single chain.
    ///
    /// Returns `Ok(None)` if the chain has no EVM chain id, no v2 deployment, or lacks an
    /// endpoint or executor under [`MissingAddressPolicy::Skip`].
    pub fn build(
        &self,
        chain_key: &str,
        metadata: &ChainMetadata,
        include_validators: bool,
    ) -> Result<Option<ChainConfig>, ConfigError> {
        let Some(native_chain_id) = metadata.chain_details.native_chain_id else {
            debug!(chain = %chain_key, "Skipping chain without native chain id");
            return Ok(None);
        };
        let Some(deployment) = metadata.v2_deployment() else {
            debug!(chain = %chain_key, "Skipping chain without v2 deployment");
            return Ok(None);
        };

        let Some(endpoint) = self.required_address(chain_key, &deployment.endpoint_v2, "endpoint")?
        else {
            return Ok(None);
        };
        let Some(executor) = self.required_address(chain_key, &deployment.executor, "executor")?
        else {
            return Ok(None);
        };

        let send_library = library_address(chain_key, deployment, LibraryKind::Send)?;
        let receive_library = library_address(chain_key, deployment, LibraryKind::Receive)?;

        let eid = deployment.eid.parse::<u32>().map_err(|err| ConfigError::InvalidMetadata {
            chain: chain_key.to_string(),
            reason: format!("invalid eid {:?}: {err}", deployment.eid),
        })?;

        let is_mainnet = deployment.is_mainnet();
        let dvns = if include_validators {
            self.resolve_dvns(chain_key, metadata, is_mainnet)?
        } else {
            Vec::new()
        };

        let token = self.tokens.get(&native_chain_id);

        Ok(Some(ChainConfig {
            chain_key: chain_key.to_string(),
            eid,
            native_chain_id,
            endpoint,
            executor,
            send_library,
            receive_library,
            dvns,
            token: token.map(|token| token.address),
            confirmations: token.map(|token| token.confirmations),
            is_mainnet,
        }))
    }

    /// Resolves an endpoint or executor address according to the policy.
    fn required_address(
        &self,
        chain_key: &str,
        record: &Option<AddressRecord>,
        field: &'static str,
    ) -> Result<Option<Address>, ConfigError> {
        match record.as_ref().filter(|record| !record.address.is_empty()) {
            Some(record) => parse_address(chain_key, &record.address).map(Some),
            None => match self.policy {
                MissingAddressPolicy::Skip => {
                    warn!(chain = %chain_key, field, "Skipping chain with missing address");
                    Ok(None)
                }
                MissingAddressPolicy::Error => Err(ConfigError::MissingEndpointAddress {
                    chain: chain_key.to_string(),
                    field,
                }),
            },
        }
    }

    /// Filters the chain's DVNs down to the required set and checks its size.
    fn resolve_dvns(
        &self,
        chain_key: &str,
        metadata: &ChainMetadata,
        is_mainnet: bool,
    ) -> Result<Vec<Address>, ConfigError> {
        let mut dvns = BTreeSet::new();
        for (address, dvn) in &metadata.dvns {
            let eligible = dvn.version == crate::constants::PROTOCOL_VERSION
                && !dvn.deprecated
                && !dvn.lz_read_compatible
                && self.required_dvns.matches(&dvn.canonical_name, is_mainnet);
            if eligible {
                dvns.insert(parse_address(chain_key, address)?);
            }
        }

        let expected = expected_dvn_count(is_mainnet);
        if dvns.len() != expected {
            return Err(ConfigError::ValidatorCountMismatch {
                chain: chain_key.to_string(),
                expected,
                found: dvns.len(),
                names: self.required_dvns.names(is_mainnet),
            });
        }

        Ok(dvns.into_iter().collect())
    }
}

fn library_address(
    chain_key: &str,
    deployment: &Deployment,
    kind: LibraryKind,
) -> Result<Address, ConfigError> {
    let record = match kind {
        LibraryKind::Send => &deployment.send_uln302,
        LibraryKind::Receive => &deployment.receive_uln302,
    };
    match record.as_ref().filter(|record| !record.address.is_empty()) {
        Some(record) => parse_address(chain_key, &record.address),
        None => Err(ConfigError::MissingLibraryAddress { chain: chain_key.to_string(), kind }),
    }
}

fn parse_address(chain_key: &str, address: &str) -> Result<Address, ConfigError> {
    Address::from_str(address).map_err(|err| ConfigError::InvalidMetadata {
        chain: chain_key.to_string(),
        reason: format!("invalid address {address:?}: {err}"),
    })
}
