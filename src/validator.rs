//! Precondition checks against on-chain state.

use crate::{
    chains::{ChainConfig, LibraryKind},
    contracts::ILayerZeroEndpointV2,
    error::{PreconditionError, WireError},
};
use alloy::{primitives::Address, providers::DynProvider};
use async_trait::async_trait;
use tracing::debug;

/// Read access to the default libraries of an endpoint.
#[async_trait]
pub trait EndpointReader: Send + Sync {
    /// The default send library of `endpoint` for messages to `eid`.
    async fn default_send_library(
        &self,
        endpoint: Address,
        eid: u32,
    ) -> Result<Address, WireError>;

    /// The default receive library of `endpoint` for messages from `eid`.
    async fn default_receive_library(
        &self,
        endpoint: Address,
        eid: u32,
    ) -> Result<Address, WireError>;
}

/// [`EndpointReader`] backed by the endpoint contracts of the connected chain.
#[derive(Debug, Clone)]
pub struct OnchainEndpoint {
    provider: DynProvider,
}

impl OnchainEndpoint {
    /// Creates a reader over `provider`.
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl EndpointReader for OnchainEndpoint {
    async fn default_send_library(
        &self,
        endpoint: Address,
        eid: u32,
    ) -> Result<Address, WireError> {
        let endpoint = ILayerZeroEndpointV2::new(endpoint, &self.provider);
        Ok(endpoint.defaultSendLibrary(eid).call().await?)
    }

    async fn default_receive_library(
        &self,
        endpoint: Address,
        eid: u32,
    ) -> Result<Address, WireError> {
        let endpoint = ILayerZeroEndpointV2::new(endpoint, &self.provider);
        Ok(endpoint.defaultReceiveLibrary(eid).call().await?)
    }
}

/// Checks that the source endpoint's default libraries are the ones in the chain configuration
/// before `destination` is wired.
///
/// Both libraries are read for the source's own eid.
pub async fn check_libraries(
    reader: &dyn EndpointReader,
    source: &ChainConfig,
    destination: &ChainConfig,
) -> Result<(), WireError> {
    let send = reader.default_send_library(source.endpoint, source.eid).await?;
    ensure_library(source, destination, LibraryKind::Send, source.send_library, send)?;

    let receive = reader.default_receive_library(source.endpoint, source.eid).await?;
    ensure_library(source, destination, LibraryKind::Receive, source.receive_library, receive)?;

    debug!(chain = %source.chain_key, eid = source.eid, "Default libraries match");
    Ok(())
}

fn ensure_library(
    source: &ChainConfig,
    destination: &ChainConfig,
    kind: LibraryKind,
    expected: Address,
    actual: Address,
) -> Result<(), PreconditionError> {
    if expected != actual {
        return Err(PreconditionError::LibraryMismatch {
            chain: source.chain_key.clone(),
            destination: destination.chain_key.clone(),
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}
