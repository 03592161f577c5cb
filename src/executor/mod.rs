//! Execution strategies.
//!
//! Transactions are either broadcast one by one through the connected wallet
//! ([`DirectExecutor`]) or collected and proposed to Safe multisigs at the end of the run
//! ([`SafeExecutor`]). The strategy is picked once per run.

mod direct;
pub use direct::DirectExecutor;

mod safe;
pub use safe::SafeExecutor;

use crate::{error::WireError, transactions::PendingTransaction};
use alloy::primitives::{Address, B256, TxHash};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How transactions of a run reach the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Broadcast through the connected wallet.
    Direct,
    /// Proposed to a Safe multisig.
    Safe,
}

/// What happened to a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The transaction was mined and succeeded.
    Confirmed {
        /// The call label.
        label: String,
        /// The transaction hash.
        tx_hash: TxHash,
    },
    /// The transaction was queued for a Safe proposal.
    Queued {
        /// The call label.
        label: String,
    },
    /// A batch was proposed to a Safe.
    Proposed {
        /// The Safe.
        safe: Address,
        /// EIP-712 hash of the Safe transaction.
        safe_tx_hash: B256,
        /// Number of calls in the batch.
        calls: usize,
    },
}

/// A strategy for getting configuration transactions executed.
#[async_trait]
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Returns the mode of this executor.
    fn mode(&self) -> ExecutionMode;

    /// Prepares the executor before anything is submitted.
    async fn prepare(&mut self) -> Result<(), WireError> {
        Ok(())
    }

    /// Submits the transactions of a destination, in order.
    async fn submit(
        &mut self,
        destination: &str,
        txs: Vec<PendingTransaction>,
    ) -> Result<Vec<Submission>, WireError>;

    /// Completes the run.
    ///
    /// Strategies that collect transactions hand them off here.
    async fn finish(&mut self, description: &str) -> Result<Vec<Submission>, WireError>;
}
