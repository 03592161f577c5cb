use crate::chains::LibraryKind;
use alloy::primitives::Address;
use thiserror::Error;

/// On-chain state disagrees with the local configuration.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// The endpoint's default library differs from the configured one.
    #[error(
        "{kind} library mismatch on {chain} while wiring to {destination}: expected {expected}, \
         endpoint reports {actual}"
    )]
    LibraryMismatch {
        /// The chain key.
        chain: String,
        /// The destination being wired when the mismatch was found.
        destination: String,
        /// Which library.
        kind: LibraryKind,
        /// The library from the metadata.
        expected: Address,
        /// The library registered on the endpoint.
        actual: Address,
    },
}
