//! Wiring configuration.
use crate::{
    constants::{
        DEFAULT_REQUIRED_DVN, DEFAULT_REQUIRED_MAINNET_DVN, MULTI_SEND_CALL_ONLY,
        SAFE_SERVICE_BASE_URL,
    },
    error::ConfigError,
    metadata::MetadataTable,
};
use alloy::primitives::{Address, ChainId};
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use url::Url;

/// Wiring configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireConfig {
    /// Path to the LayerZero metadata JSON file.
    pub metadata: PathBuf,
    /// RPC endpoints keyed by chain key.
    ///
    /// Chains not listed here fall back to the best ranked RPC in the metadata.
    #[serde(default)]
    pub chains: BTreeMap<String, Url>,
    /// Deployed tokens keyed by EVM chain id.
    #[serde(default, with = "crate::serde::key_map")]
    pub tokens: BTreeMap<ChainId, TokenDeployment>,
    /// DVNs to require on every pathway.
    #[serde(default)]
    pub dvns: RequiredDvns,
    /// How chains without an endpoint or executor are handled.
    #[serde(default)]
    pub missing_address_policy: MissingAddressPolicy,
    /// Safe proposal settings.
    #[serde(default)]
    pub safe: SafeConfig,
}

impl WireConfig {
    /// Sets the RPC endpoint of a chain.
    pub fn with_rpc_url(mut self, chain_key: impl Into<String>, url: Url) -> Self {
        self.chains.insert(chain_key.into(), url);
        self
    }

    /// Sets the Safe Transaction Service URL.
    pub fn with_safe_service_url(mut self, url: Option<Url>) -> Self {
        if let Some(url) = url {
            self.safe.service_url = Some(url);
        }
        self
    }

    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Loads the metadata file referenced by this configuration.
    pub fn load_metadata(&self) -> Result<MetadataTable, ConfigError> {
        MetadataTable::load_from_file(&self.metadata)
    }

    /// Returns the RPC endpoint of a chain.
    ///
    /// Configured endpoints win over the ones in the metadata.
    pub fn rpc_url(&self, chain_key: &str, metadata: &MetadataTable) -> Result<Url, ConfigError> {
        if let Some(url) = self.chains.get(chain_key) {
            return Ok(url.clone());
        }
        metadata
            .get(chain_key)
            .and_then(|chain| chain.preferred_rpc())
            .and_then(|url| url.parse().ok())
            .ok_or_else(|| ConfigError::MissingRpcUrl(chain_key.to_string()))
    }
}

/// A deployed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDeployment {
    /// The token (OApp) address.
    pub address: Address,
    /// Block confirmations required for messages sent from this chain.
    pub confirmations: u64,
}

/// Canonical names of the DVNs to require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDvns {
    /// Required on every chain.
    pub base: String,
    /// Additionally required on mainnet chains.
    pub mainnet: String,
}

impl Default for RequiredDvns {
    fn default() -> Self {
        Self {
            base: DEFAULT_REQUIRED_DVN.to_string(),
            mainnet: DEFAULT_REQUIRED_MAINNET_DVN.to_string(),
        }
    }
}

impl RequiredDvns {
    /// Whether a DVN with this canonical name is required.
    pub fn matches(&self, canonical_name: &str, is_mainnet: bool) -> bool {
        canonical_name == self.base || (is_mainnet && canonical_name == self.mainnet)
    }

    /// The names required for a chain stage.
    pub fn names(&self, is_mainnet: bool) -> Vec<String> {
        if is_mainnet {
            vec![self.base.clone(), self.mainnet.clone()]
        } else {
            vec![self.base.clone()]
        }
    }
}

/// How chains lacking an endpoint or executor address are handled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MissingAddressPolicy {
    /// Leave the chain out of the configuration table.
    #[default]
    Skip,
    /// Fail with a configuration error.
    Error,
}

/// Safe proposal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeConfig {
    /// Safe Transaction Service URL.
    ///
    /// Defaults to the hosted service of the connected chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<Url>,
    /// The `MultiSendCallOnly` contract batches are routed through.
    #[serde(default = "default_multi_send")]
    pub multi_send: Address,
}

impl Default for SafeConfig {
    fn default() -> Self {
        Self { service_url: None, multi_send: MULTI_SEND_CALL_ONLY }
    }
}

impl SafeConfig {
    /// Returns the transaction service URL for a chain.
    ///
    /// Without an explicit URL, the hosted service is used, addressed by the chain's short name.
    pub fn service_url(&self, chain_id: ChainId) -> Option<Url> {
        if let Some(url) = &self.service_url {
            return Some(url.clone());
        }
        let short_name = safe_short_name(chain_id)?;
        format!("{SAFE_SERVICE_BASE_URL}/{short_name}").parse().ok()
    }
}

fn default_multi_send() -> Address {
    MULTI_SEND_CALL_ONLY
}

/// Short names of the networks served by the hosted Safe Transaction Service.
fn safe_short_name(chain_id: ChainId) -> Option<&'static str> {
    Some(match chain_id {
        1 => "eth",
        10 => "oeth",
        56 => "bnb",
        100 => "gno",
        130 => "unichain",
        137 => "pol",
        146 => "sonic",
        324 => "zksync",
        1101 => "zkevm",
        5000 => "mantle",
        8453 => "base",
        42161 => "arb1",
        42220 => "celo",
        43114 => "avax",
        59144 => "linea",
        80094 => "berachain",
        84532 => "basesep",
        534352 => "scr",
        11155111 => "sep",
        _ => return None,
    })
}
