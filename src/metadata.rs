//! LayerZero chain metadata.
//!
//! The metadata is the JSON document published by the LayerZero metadata API: a table keyed by
//! chain key holding deployments, DVNs and public RPCs for every chain. It is loaded once and only
//! ever read.

use crate::{
    constants::{MAINNET_STAGE, PROTOCOL_VERSION},
    error::ConfigError,
};
use alloy::primitives::ChainId;
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};
use tracing::debug;

/// The metadata table, keyed by chain key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MetadataTable(BTreeMap<String, ChainMetadata>);

impl MetadataTable {
    /// Load from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        debug!(path = %path.display(), chains = table.len(), "Loaded chain metadata");
        Ok(table)
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Returns the metadata of a chain.
    pub fn get(&self, chain_key: &str) -> Option<&ChainMetadata> {
        self.0.get(chain_key)
    }

    /// Iterates over all entries in chain key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ChainMetadata)> {
        self.0.iter()
    }

    /// Number of chains in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Metadata of a single chain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainMetadata {
    /// Chain details.
    #[serde(default)]
    pub chain_details: ChainDetails,
    /// Protocol deployments on this chain, one per protocol version.
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    /// DVNs keyed by their address.
    #[serde(default)]
    pub dvns: BTreeMap<String, DvnDescriptor>,
    /// Public RPC endpoints.
    #[serde(default)]
    pub rpcs: Vec<RpcEndpoint>,
}

impl ChainMetadata {
    /// Returns the deployment of the wired protocol version, if any.
    pub fn v2_deployment(&self) -> Option<&Deployment> {
        self.deployments.iter().find(|deployment| deployment.version == PROTOCOL_VERSION)
    }

    /// Returns the best ranked public RPC, lower rank first.
    pub fn preferred_rpc(&self) -> Option<&str> {
        self.rpcs
            .iter()
            .min_by_key(|rpc| rpc.rank.unwrap_or(u32::MAX))
            .map(|rpc| rpc.url.as_str())
    }
}

/// General chain details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDetails {
    /// The EVM chain id. Absent for non-EVM chains.
    #[serde(default)]
    pub native_chain_id: Option<ChainId>,
    /// The chain key as reported by the metadata.
    #[serde(default)]
    pub chain_key: Option<String>,
    /// The chain status, e.g. `ACTIVE`.
    #[serde(default)]
    pub chain_status: Option<String>,
}

/// A protocol deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// The LayerZero endpoint id, string encoded.
    pub eid: String,
    /// The protocol version.
    pub version: u8,
    /// The deployment stage, `mainnet` or `testnet`.
    #[serde(default)]
    pub stage: String,
    /// The endpoint contract.
    #[serde(default)]
    pub endpoint_v2: Option<AddressRecord>,
    /// The executor contract.
    #[serde(default)]
    pub executor: Option<AddressRecord>,
    /// The ULN302 send library.
    #[serde(default)]
    pub send_uln302: Option<AddressRecord>,
    /// The ULN302 receive library.
    #[serde(default)]
    pub receive_uln302: Option<AddressRecord>,
}

impl Deployment {
    /// Whether this is a mainnet deployment.
    pub fn is_mainnet(&self) -> bool {
        self.stage == MAINNET_STAGE
    }
}

/// A contract address record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressRecord {
    /// The address, hex encoded.
    #[serde(default)]
    pub address: String,
}

/// Description of a DVN.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DvnDescriptor {
    /// The protocol version the DVN serves.
    pub version: u8,
    /// Human readable name shared by all deployments of the same operator.
    pub canonical_name: String,
    /// Operator id.
    #[serde(default)]
    pub id: Option<String>,
    /// Whether the DVN is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the DVN serves lzRead channels.
    #[serde(default)]
    pub lz_read_compatible: bool,
}

/// A public RPC endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcEndpoint {
    /// The RPC URL.
    pub url: String,
    /// Rank, lower is better.
    #[serde(default)]
    pub rank: Option<u32>,
}
