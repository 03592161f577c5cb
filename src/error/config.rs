use crate::chains::LibraryKind;
use thiserror::Error;

/// Defects in the metadata, the token registry or the process configuration.
///
/// These are detected before any transaction is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The v2 deployment of a chain has no ULN302 library of the given kind.
    #[error("chain {chain} has no {kind} ULN302 library in its v2 deployment")]
    MissingLibraryAddress {
        /// The chain key.
        chain: String,
        /// Which library is missing.
        kind: LibraryKind,
    },
    /// The v2 deployment of a chain has no endpoint or executor address.
    ///
    /// Only raised with [`MissingAddressPolicy::Error`](crate::config::MissingAddressPolicy).
    #[error("chain {chain} has no {field} address in its v2 deployment")]
    MissingEndpointAddress {
        /// The chain key.
        chain: String,
        /// The missing field.
        field: &'static str,
    },
    /// The DVNs left after filtering do not match the expected count for the chain stage.
    #[error("chain {chain} should have {expected} required DVN(s) but {found} matched: {names:?}")]
    ValidatorCountMismatch {
        /// The chain key.
        chain: String,
        /// Expected count, 2 on mainnet and 1 elsewhere.
        expected: usize,
        /// Number of DVNs that matched.
        found: usize,
        /// Canonical names that were looked for.
        names: Vec<String>,
    },
    /// A chain has no confirmation depth in the token registry.
    #[error("chain {chain} has no confirmation depth configured")]
    MissingConfirmations {
        /// The chain key.
        chain: String,
    },
    /// A metadata field could not be parsed.
    #[error("invalid metadata for chain {chain}: {reason}")]
    InvalidMetadata {
        /// The chain key.
        chain: String,
        /// What was wrong.
        reason: String,
    },
    /// A secret required by the selected flow is not set.
    #[error("{0} is not set")]
    MissingSecret(&'static str),
    /// A secret is set but cannot be used.
    #[error("{name} is invalid: {reason}")]
    InvalidSecret {
        /// The environment variable.
        name: &'static str,
        /// What was wrong.
        reason: String,
    },
    /// No RPC endpoint is known for a chain.
    #[error("no RPC endpoint configured for chain {0}")]
    MissingRpcUrl(String),
    /// The metadata file could not be read.
    #[error("failed to read metadata: {0}")]
    Io(#[from] std::io::Error),
    /// The metadata file is not valid JSON.
    #[error("failed to parse metadata: {0}")]
    Json(#[from] serde_json::Error),
}
