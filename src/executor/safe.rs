use super::{ExecutionMode, Executor, Submission};
use crate::{
    error::WireError,
    safe::{SafeManager, SafeRole},
    transactions::PendingTransaction,
};
use alloy::primitives::Address;
use async_trait::async_trait;
use tracing::{debug, info};

/// Collects every transaction of the run and proposes them to Safes when the run finishes.
///
/// Transactions are grouped by the Safe that has to authorize them: endpoint calls go to the
/// delegate Safe, OApp calls to the owner Safe. When both roles are the same Safe the whole run
/// becomes a single proposal.
#[derive(Debug)]
pub struct SafeExecutor {
    manager: SafeManager,
    queued: Vec<PendingTransaction>,
}

impl SafeExecutor {
    /// Creates an executor proposing through `manager`.
    pub fn new(manager: SafeManager) -> Self {
        Self { manager, queued: Vec::new() }
    }

    /// Transactions waiting for [`Executor::finish`].
    pub fn queued(&self) -> &[PendingTransaction] {
        &self.queued
    }

    /// Groups queued transactions by Safe, keeping the order of first appearance.
    fn batches(
        &self,
        txs: Vec<PendingTransaction>,
    ) -> Result<Vec<(Address, Vec<PendingTransaction>)>, WireError> {
        let mut batches: Vec<(Address, Vec<PendingTransaction>)> = Vec::new();
        for tx in txs {
            let safe = self.manager.safe_address(SafeRole::for_category(tx.category))?;
            match batches.iter_mut().find(|(batch_safe, _)| *batch_safe == safe) {
                Some((_, batch)) => batch.push(tx),
                None => batches.push((safe, vec![tx])),
            }
        }
        Ok(batches)
    }
}

#[async_trait]
impl Executor for SafeExecutor {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Safe
    }

    async fn prepare(&mut self) -> Result<(), WireError> {
        self.manager.initialize().await
    }

    async fn submit(
        &mut self,
        destination: &str,
        txs: Vec<PendingTransaction>,
    ) -> Result<Vec<Submission>, WireError> {
        debug!(%destination, count = txs.len(), "Queueing transactions for Safe proposal");
        let submissions =
            txs.iter().map(|tx| Submission::Queued { label: tx.label.clone() }).collect();
        self.queued.extend(txs);
        Ok(submissions)
    }

    async fn finish(&mut self, description: &str) -> Result<Vec<Submission>, WireError> {
        let queued = std::mem::take(&mut self.queued);
        if queued.is_empty() {
            info!("Nothing to propose");
            return Ok(Vec::new());
        }

        let mut submissions = Vec::new();
        for (safe, txs) in self.batches(queued)? {
            let proposal = self.manager.propose(safe, &txs, description).await?;
            submissions.push(Submission::Proposed {
                safe,
                safe_tx_hash: proposal.safe_tx_hash,
                calls: proposal.calls,
            });
        }
        Ok(submissions)
    }
}
