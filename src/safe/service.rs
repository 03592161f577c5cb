//! Safe Transaction Service client.

use super::SafeProposal;
use crate::{contracts::ISafe, error::SafeError};
use alloy::{
    primitives::{Address, U256},
    providers::DynProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Access to a Safe's nonce and to the proposal queue.
#[async_trait]
pub trait SafeBackend: Send + Sync {
    /// The next nonce of `safe`.
    async fn nonce(&self, safe: Address) -> Result<U256, SafeError>;

    /// Queues a signed proposal.
    async fn propose(&self, proposal: &SafeProposal) -> Result<(), SafeError>;
}

/// [`SafeBackend`] backed by the Safe Transaction Service, reading nonces on-chain.
#[derive(Debug, Clone)]
pub struct SafeServiceClient {
    client: Client,
    service_url: Url,
    api_key: Option<String>,
    provider: DynProvider,
}

impl SafeServiceClient {
    /// Creates a new client.
    pub fn new(service_url: Url, api_key: Option<String>, provider: DynProvider) -> Self {
        Self { client: Client::new(), service_url, api_key, provider }
    }

    fn proposal_url(&self, safe: Address) -> String {
        format!(
            "{}/api/v1/safes/{safe}/multisig-transactions/",
            self.service_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SafeBackend for SafeServiceClient {
    async fn nonce(&self, safe: Address) -> Result<U256, SafeError> {
        ISafe::new(safe, self.provider.clone())
            .nonce()
            .call()
            .await
            .map_err(|err| SafeError::Nonce { safe, reason: err.to_string() })
    }

    async fn propose(&self, proposal: &SafeProposal) -> Result<(), SafeError> {
        let url = self.proposal_url(proposal.safe);
        debug!(%url, safe_tx_hash = %proposal.safe_tx_hash, "Proposing Safe transaction");

        let mut request = self.client.post(&url).json(&ProposeTransactionBody::from(proposal));
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        let response = request.send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(SafeError::Rejected { status, body })
        }
    }
}

/// Request body of `POST /api/v1/safes/{safe}/multisig-transactions/`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProposeTransactionBody {
    to: String,
    value: String,
    data: String,
    operation: u8,
    safe_tx_gas: String,
    base_gas: String,
    gas_price: String,
    gas_token: String,
    refund_receiver: String,
    nonce: String,
    contract_transaction_hash: String,
    sender: String,
    signature: String,
    origin: String,
}

impl From<&SafeProposal> for ProposeTransactionBody {
    fn from(proposal: &SafeProposal) -> Self {
        let tx = &proposal.tx;
        Self {
            to: tx.to.to_checksum(None),
            value: tx.value.to_string(),
            data: tx.data.to_string(),
            operation: tx.operation,
            safe_tx_gas: tx.safeTxGas.to_string(),
            base_gas: tx.baseGas.to_string(),
            gas_price: tx.gasPrice.to_string(),
            gas_token: tx.gasToken.to_checksum(None),
            refund_receiver: tx.refundReceiver.to_checksum(None),
            nonce: tx.nonce.to_string(),
            contract_transaction_hash: proposal.safe_tx_hash.to_string(),
            sender: proposal.sender.to_checksum(None),
            signature: proposal.signature.to_string(),
            origin: proposal.origin.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::MULTI_SEND_CALL_ONLY, safe::build_safe_tx};
    use alloy::primitives::{B256, bytes};

    #[test]
    fn proposal_body() {
        let proposal = SafeProposal {
            safe: Address::repeat_byte(0x5a),
            tx: build_safe_tx(&[], MULTI_SEND_CALL_ONLY, U256::from(12)),
            safe_tx_hash: B256::repeat_byte(0x11),
            sender: Address::repeat_byte(0x22),
            signature: bytes!("0xabcd"),
            origin: "Wire sonic".to_string(),
            calls: 0,
        };
        let body = serde_json::to_value(ProposeTransactionBody::from(&proposal)).unwrap();

        assert_eq!(body["to"], MULTI_SEND_CALL_ONLY.to_checksum(None));
        assert_eq!(body["value"], "0");
        assert_eq!(body["operation"], 1);
        assert_eq!(body["safeTxGas"], "0");
        assert_eq!(body["nonce"], "12");
        assert_eq!(body["contractTransactionHash"], B256::repeat_byte(0x11).to_string());
        assert_eq!(body["sender"], Address::repeat_byte(0x22).to_checksum(None));
        assert_eq!(body["gasToken"], Address::ZERO.to_checksum(None));
        assert_eq!(body["signature"], "0xabcd");
        assert_eq!(body["origin"], "Wire sonic");
        assert!(body["data"].as_str().unwrap().starts_with("0x8d80ff0a"));
    }
}
