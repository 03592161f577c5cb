use alloy::primitives::Address;
use thiserror::Error;

/// Errors from the Safe proposal flow.
#[derive(Debug, Error)]
pub enum SafeError {
    /// The Safe manager was used before [`SafeManager::initialize`](crate::safe::SafeManager).
    #[error("Safe manager not initialized")]
    NotInitialized,
    /// Nothing to propose.
    #[error("refusing to propose an empty batch to Safe {0}")]
    EmptyBatch(Address),
    /// The chain has no hosted transaction service.
    #[error("no Safe Transaction Service known for chain {0}, configure one explicitly")]
    UnsupportedChain(u64),
    /// Signing the Safe transaction hash failed.
    #[error("failed to sign Safe transaction hash: {0}")]
    Signing(#[from] alloy::signers::Error),
    /// The HTTP request failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The transaction service rejected the proposal.
    #[error("Safe Transaction Service rejected the proposal ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// Reading the Safe nonce failed.
    #[error("failed to read nonce of Safe {safe}: {reason}")]
    Nonce {
        /// The Safe address.
        safe: Address,
        /// The underlying error.
        reason: String,
    },
}
