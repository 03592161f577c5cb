use alloy::primitives::ChainId;
use thiserror::Error;

/// Errors raised while planning the mesh, before any chain is written to.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// No chain was requested.
    #[error("no chains to wire")]
    EmptyChainList,
    /// A requested chain has no built configuration.
    #[error("chain configuration not found for {0}")]
    UnknownChain(String),
    /// A requested chain has no deployed token.
    #[error("no token address found for chain {0}")]
    MissingTokenAddress(String),
    /// The connected chain does not match the source chain configuration.
    #[error(
        "connected chain {connected} does not match source chain {}{}",
        network.as_deref().unwrap_or("<none>"),
        configured.map(|id| format!(" ({id})")).unwrap_or_default()
    )]
    SourceChainMismatch {
        /// The network name passed by the caller, if any.
        network: Option<String>,
        /// The chain id reported by the connected RPC.
        connected: ChainId,
        /// The chain id configured for `network`, if it has a configuration.
        configured: Option<ChainId>,
    },
}
