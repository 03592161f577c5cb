//! Transaction and proposal signers.

mod r#dyn;
pub use r#dyn::DynSigner;

use alloy::primitives::{Address, B256, Bytes};
use std::path::PathBuf;

/// Signs Safe transaction hashes on behalf of a proposer.
#[async_trait::async_trait]
pub trait SafeHashSigner: std::fmt::Debug + Send + Sync {
    /// The proposer address.
    fn proposer(&self) -> Address;

    /// Signs the EIP-712 Safe transaction hash.
    ///
    /// Returns a 65 byte `eth_sign` signature as accepted by the Safe contracts, with `v`
    /// shifted by 4.
    async fn sign_safe_hash(&self, safe_tx_hash: B256) -> alloy::signers::Result<Bytes>;
}

/// Where the wallet credentials come from.
#[derive(Clone)]
pub enum SignerSource {
    /// An encrypted JSON keystore.
    Keystore {
        /// Path to the keystore file.
        path: PathBuf,
        /// Keystore password.
        password: String,
    },
    /// A BIP-39 mnemonic, first account.
    Mnemonic(String),
    /// A raw private key.
    PrivateKey(String),
    /// An AWS KMS key id.
    Kms(String),
}

impl std::fmt::Debug for SignerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keystore { path, .. } => f.debug_tuple("Keystore").field(path).finish(),
            Self::Mnemonic(_) => f.write_str("Mnemonic"),
            Self::PrivateKey(_) => f.write_str("PrivateKey"),
            Self::Kms(key_id) => f.debug_tuple("Kms").field(key_id).finish(),
        }
    }
}

impl SignerSource {
    /// Picks the first configured source.
    ///
    /// A keystore wins over a mnemonic, which wins over a private key, which wins over KMS. A
    /// keystore without a password is not considered.
    pub fn select(
        keystore_path: Option<PathBuf>,
        keystore_password: Option<String>,
        mnemonic: Option<String>,
        private_key: Option<String>,
        kms_key_id: Option<String>,
    ) -> Option<Self> {
        if let (Some(path), Some(password)) = (keystore_path, keystore_password) {
            return Some(Self::Keystore { path, password });
        }
        mnemonic
            .map(Self::Mnemonic)
            .or_else(|| private_key.map(Self::PrivateKey))
            .or_else(|| kms_key_id.map(Self::Kms))
    }

    /// Loads the signer.
    pub async fn load(self, chain_id: Option<u64>) -> eyre::Result<DynSigner> {
        match self {
            Self::Keystore { path, password } => DynSigner::from_keystore(&path, &password),
            Self::Mnemonic(phrase) => DynSigner::from_mnemonic(&phrase),
            Self::PrivateKey(key) => DynSigner::from_signing_key(&key),
            Self::Kms(key_id) => DynSigner::from_kms(&key_id, chain_id).await,
        }
    }
}
