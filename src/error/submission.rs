use alloy::primitives::TxHash;
use thiserror::Error;

/// Errors broadcasting a transaction or waiting for it.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The transaction could not be sent.
    #[error("failed to send {label} towards {destination}: {reason}")]
    Send {
        /// The destination chain key.
        destination: String,
        /// The call label.
        label: String,
        /// The underlying error.
        reason: String,
    },
    /// The transaction was sent but waiting for its confirmations failed.
    #[error("failed to confirm {label} towards {destination} ({tx_hash}): {reason}")]
    Confirmation {
        /// The destination chain key.
        destination: String,
        /// The call label.
        label: String,
        /// The transaction hash.
        tx_hash: TxHash,
        /// The underlying error.
        reason: String,
    },
    /// The transaction was mined but reverted.
    #[error("{label} towards {destination} reverted in {tx_hash}")]
    Reverted {
        /// The destination chain key.
        destination: String,
        /// The call label.
        label: String,
        /// The transaction hash.
        tx_hash: TxHash,
    },
}
