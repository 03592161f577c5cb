//! Safe multisig proposals.
//!
//! Instead of broadcasting, configuration calls can be proposed to the Safe that owns (or is the
//! delegate of) the OApp. A batch is turned into a single Safe transaction, signed by the
//! proposer key and queued on the Safe Transaction Service where the owners confirm it.

mod service;
pub use service::{SafeBackend, SafeServiceClient};

mod transaction;
pub use transaction::{Operation, build_safe_tx, encode_multi_send, safe_domain, safe_tx_hash};

use crate::{
    constants::SAFE_APP_URL,
    contracts::SafeTx,
    error::{ConfigError, SafeError, WireError},
    signers::{DynSigner, SafeHashSigner},
    transactions::{OperationCategory, PendingTransaction},
};
use alloy::primitives::{Address, B256, Bytes, ChainId};
use std::{fmt, sync::Arc};
use strum::Display;
use tokio::sync::OnceCell;
use tracing::info;

/// The identity a Safe acts as towards the OApp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SafeRole {
    /// The OApp owner, sets peers and enforced options.
    Owner,
    /// The OApp delegate on the endpoint, sets libraries and configs.
    Delegate,
}

impl SafeRole {
    /// The role that authorizes calls of a category.
    pub fn for_category(category: OperationCategory) -> Self {
        match category {
            OperationCategory::Endpoint => Self::Delegate,
            OperationCategory::Peer => Self::Owner,
        }
    }

    /// The environment variable holding the Safe address of this role.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Owner => "SAFE_OWNER_ADDRESS",
            Self::Delegate => "SAFE_DELEGATE_ADDRESS",
        }
    }
}

/// Credentials of the Safe proposal flow.
#[derive(Clone, Default)]
pub struct SafeSecrets {
    /// Safe Transaction Service API key.
    pub api_key: Option<String>,
    /// Private key of the proposer.
    pub proposer_key: Option<String>,
    /// The Safe owning the OApp.
    pub owner: Option<Address>,
    /// The Safe set as the OApp delegate.
    pub delegate: Option<Address>,
}

impl fmt::Debug for SafeSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeSecrets")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("proposer_key", &self.proposer_key.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("delegate", &self.delegate)
            .finish()
    }
}

impl SafeSecrets {
    /// The Safe address of a role.
    pub fn safe(&self, role: SafeRole) -> Option<Address> {
        match role {
            SafeRole::Owner => self.owner,
            SafeRole::Delegate => self.delegate,
        }
    }
}

/// A signed Safe transaction as queued on the transaction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeProposal {
    /// The Safe.
    pub safe: Address,
    /// The Safe transaction.
    pub tx: SafeTx,
    /// EIP-712 hash of the Safe transaction.
    pub safe_tx_hash: B256,
    /// The proposer.
    pub sender: Address,
    /// The proposer's signature.
    pub signature: Bytes,
    /// Description shown in the Safe interface.
    pub origin: String,
    /// Number of calls in the batch.
    pub calls: usize,
}

#[derive(Debug)]
struct SafeState {
    proposer: Arc<dyn SafeHashSigner>,
}

/// Builds, signs and queues Safe proposals.
pub struct SafeManager {
    chain_id: ChainId,
    multi_send: Address,
    roles: Vec<SafeRole>,
    secrets: SafeSecrets,
    backend: Arc<dyn SafeBackend>,
    state: OnceCell<SafeState>,
}

impl fmt::Debug for SafeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeManager")
            .field("chain_id", &self.chain_id)
            .field("multi_send", &self.multi_send)
            .field("roles", &self.roles)
            .field("secrets", &self.secrets)
            .field("initialized", &self.state.initialized())
            .finish()
    }
}

impl SafeManager {
    /// Creates a manager for Safes on `chain_id` that needs both roles.
    pub fn new(
        chain_id: ChainId,
        multi_send: Address,
        secrets: SafeSecrets,
        backend: Arc<dyn SafeBackend>,
    ) -> Self {
        Self {
            chain_id,
            multi_send,
            roles: vec![SafeRole::Owner, SafeRole::Delegate],
            secrets,
            backend,
            state: OnceCell::new(),
        }
    }

    /// Restricts the roles whose Safe address is required.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = SafeRole>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Validates the credentials and loads the proposer key.
    ///
    /// Only the first call does any work.
    pub async fn initialize(&self) -> Result<(), WireError> {
        self.state.get_or_try_init(|| async { self.load_state() }).await?;
        Ok(())
    }

    fn load_state(&self) -> Result<SafeState, ConfigError> {
        if self.secrets.api_key.is_none() {
            return Err(ConfigError::MissingSecret("SAFE_API_KEY"));
        }
        let proposer_key = self
            .secrets
            .proposer_key
            .as_deref()
            .ok_or(ConfigError::MissingSecret("PRIVATE_KEY_PROPOSER"))?;
        let proposer = DynSigner::from_signing_key(proposer_key).map_err(|err| {
            ConfigError::InvalidSecret { name: "PRIVATE_KEY_PROPOSER", reason: err.to_string() }
        })?;

        for role in &self.roles {
            if self.secrets.safe(*role).is_none() {
                return Err(ConfigError::MissingSecret(role.env_var()));
            }
        }

        info!(
            chain_id = self.chain_id,
            proposer = %proposer.address(),
            owner = ?self.secrets.owner,
            delegate = ?self.secrets.delegate,
            "Safe manager initialized"
        );
        Ok(SafeState { proposer: Arc::new(proposer) })
    }

    /// The Safe address of a role.
    pub fn safe_address(&self, role: SafeRole) -> Result<Address, WireError> {
        if !self.state.initialized() {
            return Err(SafeError::NotInitialized.into());
        }
        Ok(self.secrets.safe(role).ok_or(ConfigError::MissingSecret(role.env_var()))?)
    }

    /// Proposes `txs` as one Safe transaction on `safe`.
    pub async fn propose(
        &self,
        safe: Address,
        txs: &[PendingTransaction],
        description: &str,
    ) -> Result<SafeProposal, WireError> {
        let state = self.state.get().ok_or(SafeError::NotInitialized)?;
        if txs.is_empty() {
            return Err(SafeError::EmptyBatch(safe).into());
        }

        let nonce = self.backend.nonce(safe).await?;
        let tx = build_safe_tx(txs, self.multi_send, nonce);
        let safe_tx_hash = safe_tx_hash(&tx, self.chain_id, safe);
        let signature =
            state.proposer.sign_safe_hash(safe_tx_hash).await.map_err(SafeError::from)?;

        let proposal = SafeProposal {
            safe,
            tx,
            safe_tx_hash,
            sender: state.proposer.proposer(),
            signature,
            origin: description.to_string(),
            calls: txs.len(),
        };
        self.backend.propose(&proposal).await?;

        info!(
            %safe,
            %safe_tx_hash,
            %nonce,
            calls = txs.len(),
            "Proposed Safe transaction, review it at {SAFE_APP_URL}/transactions/queue"
        );
        Ok(proposal)
    }
}
