//! Wiring error types.
use crate::orchestrator::DestinationReport;
use alloy::transports::TransportErrorKind;
use strum::Display;
use thiserror::Error;

mod config;
pub use config::ConfigError;

mod precondition;
pub use precondition::PreconditionError;

mod safe;
pub use safe::SafeError;

mod submission;
pub use submission::SubmissionError;

mod topology;
pub use topology::TopologyError;

/// The overarching error type of a wiring run.
///
/// Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum WireError {
    /// Bad or missing metadata, registry entries or secrets.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Unknown chains, missing token addresses or a source mismatch.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// On-chain state disagrees with the expected libraries.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// A transaction failed to broadcast or confirm.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    /// The Safe proposal flow failed.
    #[error(transparent)]
    Safe(#[from] SafeError),
    /// An error occurred during ABI encoding/decoding.
    #[error(transparent)]
    Abi(#[from] alloy::sol_types::Error),
    /// An error occurred calling a contract.
    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),
    /// An error occurred talking to RPC.
    #[error(transparent)]
    Rpc(#[from] alloy::transports::RpcError<TransportErrorKind>),
    /// An internal error occurred.
    #[error(transparent)]
    Internal(#[from] eyre::Error),
    /// A destination failed after earlier destinations of the run completed.
    #[error("run stopped after {} completed destination(s): {source}", completed.len())]
    Partial {
        /// Destinations handled before the failure, in processing order.
        completed: Vec<DestinationReport>,
        /// The failure.
        source: Box<WireError>,
    },
}

/// Coarse classification of a [`WireError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Bad or missing metadata, registry entries or secrets.
    ConfigurationDefect,
    /// On-chain state disagrees with the local configuration.
    PreconditionFailure,
    /// Unknown chain, missing token address or source mismatch.
    TopologyError,
    /// A transaction reverted or could not be broadcast.
    SubmissionFailure,
    /// The authorization service rejected the proposal or could not be reached.
    AuthorizationServiceError,
    /// Anything else, usually RPC reads.
    Other,
}

impl WireError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::ConfigurationDefect,
            Self::Topology(_) => ErrorKind::TopologyError,
            Self::Precondition(_) => ErrorKind::PreconditionFailure,
            Self::Submission(_) => ErrorKind::SubmissionFailure,
            Self::Safe(_) => ErrorKind::AuthorizationServiceError,
            Self::Abi(_) | Self::Contract(_) | Self::Rpc(_) | Self::Internal(_) => ErrorKind::Other,
            Self::Partial { source, .. } => source.kind(),
        }
    }

    /// Destinations that completed before this error, empty unless the run stopped partway.
    pub fn completed(&self) -> &[DestinationReport] {
        match self {
            Self::Partial { completed, .. } => completed,
            _ => &[],
        }
    }
}
