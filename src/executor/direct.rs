use super::{ExecutionMode, Executor, Submission};
use crate::{
    constants::NUM_BLOCKS_TO_WAIT,
    error::{SubmissionError, WireError},
    transactions::PendingTransaction,
};
use alloy::{
    network::ReceiptResponse,
    providers::{DynProvider, Provider},
};
use async_trait::async_trait;
use tracing::info;

/// Sends every transaction through the connected wallet and waits for its confirmations before
/// sending the next one.
///
/// Nothing is rolled back when a transaction fails.
#[derive(Debug, Clone)]
pub struct DirectExecutor {
    provider: DynProvider,
}

impl DirectExecutor {
    /// Creates an executor over a wallet provider.
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    async fn send(
        &self,
        destination: &str,
        tx: PendingTransaction,
    ) -> Result<Submission, SubmissionError> {
        let pending =
            self.provider.send_transaction(tx.to_request()).await.map_err(|err| {
                SubmissionError::Send {
                    destination: destination.to_string(),
                    label: tx.label.clone(),
                    reason: err.to_string(),
                }
            })?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending
            .with_required_confirmations(NUM_BLOCKS_TO_WAIT)
            .get_receipt()
            .await
            .map_err(|err| SubmissionError::Confirmation {
                destination: destination.to_string(),
                label: tx.label.clone(),
                tx_hash,
                reason: err.to_string(),
            })?;

        if !receipt.status() {
            return Err(SubmissionError::Reverted {
                destination: destination.to_string(),
                label: tx.label,
                tx_hash,
            });
        }

        info!(%destination, label = %tx.label, %tx_hash, "Transaction confirmed");
        Ok(Submission::Confirmed { label: tx.label, tx_hash })
    }
}

#[async_trait]
impl Executor for DirectExecutor {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Direct
    }

    async fn submit(
        &mut self,
        destination: &str,
        txs: Vec<PendingTransaction>,
    ) -> Result<Vec<Submission>, WireError> {
        let mut submissions = Vec::with_capacity(txs.len());
        for tx in txs {
            submissions.push(self.send(destination, tx).await?);
        }
        Ok(submissions)
    }

    async fn finish(&mut self, _description: &str) -> Result<Vec<Submission>, WireError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, transactions::OperationCategory};
    use alloy::{
        primitives::{Address, Bytes},
        providers::ProviderBuilder,
    };

    #[tokio::test]
    async fn unreachable_rpc_stops_at_first_call() {
        // nothing listens on port 1
        let provider = ProviderBuilder::new().connect_http("http://127.0.0.1:1".parse().unwrap());
        let mut executor = DirectExecutor::new(DynProvider::new(provider));
        let to = Address::repeat_byte(1);
        let call = |label: &str| {
            PendingTransaction::new(to, Bytes::new(), OperationCategory::Peer, label)
        };

        let err = executor
            .submit("avalanche", vec![call("setPeer"), call("setEnforcedOptions")])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SubmissionFailure);
        assert!(matches!(
            err,
            WireError::Submission(SubmissionError::Send { ref destination, ref label, .. })
                if destination == "avalanche" && label == "setPeer"
        ));
        assert_eq!(executor.mode(), ExecutionMode::Direct);
        assert!(executor.finish("Wire avalanche").await.unwrap().is_empty());
    }
}
