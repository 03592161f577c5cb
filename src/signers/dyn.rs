//! Multi-signer abstraction.
//!
//! A signer abstracted over multiple underlying signers.
use super::SafeHashSigner;
use alloy::{
    network::{FullSigner, TxSigner},
    primitives::{Address, B256, Bytes, Signature},
    signers::{
        Signer,
        aws::AwsSigner,
        local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
};
use aws_config::BehaviorVersion;
use std::{fmt, ops::Deref, path::Path, str::FromStr, sync::Arc};

/// Abstraction over local, keystore, mnemonic and KMS signers.
#[derive(Clone)]
pub struct DynSigner(pub Arc<dyn FullSigner<Signature> + Send + Sync>);

impl fmt::Debug for DynSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynSigner").field(&self.address()).finish()
    }
}

impl DynSigner {
    /// Load a private key.
    pub fn from_signing_key(key: &str) -> eyre::Result<Self> {
        Ok(Self(Arc::new(PrivateKeySigner::from_str(key.trim())?)))
    }

    /// Derives the first account of a mnemonic.
    pub fn from_mnemonic(phrase: &str) -> eyre::Result<Self> {
        let signer = MnemonicBuilder::<English>::default().phrase(phrase.trim()).index(0)?.build()?;
        Ok(Self(Arc::new(signer)))
    }

    /// Decrypts a JSON keystore.
    pub fn from_keystore(path: &Path, password: &str) -> eyre::Result<Self> {
        Ok(Self(Arc::new(PrivateKeySigner::decrypt_keystore(path, password)?)))
    }

    /// Load a signer from AWS KMS.
    pub async fn from_kms(key_id: &str, chain_id: Option<u64>) -> eyre::Result<Self> {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = aws_sdk_kms::Client::new(&config);
        Ok(Self(Arc::new(AwsSigner::new(client, key_id.to_string(), chain_id).await?)))
    }

    /// Returns the signer's Ethereum Address.
    pub fn address(&self) -> Address {
        TxSigner::address(&self.0)
    }
}

impl Deref for DynSigner {
    type Target = dyn FullSigner<Signature> + Send + Sync;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[async_trait::async_trait]
impl SafeHashSigner for DynSigner {
    fn proposer(&self) -> Address {
        self.address()
    }

    async fn sign_safe_hash(&self, safe_tx_hash: B256) -> alloy::signers::Result<Bytes> {
        let mut signature = self.sign_message(safe_tx_hash.as_slice()).await?.as_bytes();
        // eth_sign signatures are marked by v > 30
        signature[64] += 4;
        Ok(signature.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn private_key_and_mnemonic_agree() {
        let from_key = DynSigner::from_signing_key(KEY).unwrap();
        let from_mnemonic = DynSigner::from_mnemonic(
            "test test test test test test test test test test test junk",
        )
        .unwrap();

        let expected = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(from_key.address(), expected);
        assert_eq!(from_mnemonic.address(), expected);
        assert!(DynSigner::from_signing_key("not a key").is_err());
    }

    #[tokio::test]
    async fn safe_signature_recovers_proposer() {
        let signer = DynSigner::from_signing_key(KEY).unwrap();
        let hash = B256::repeat_byte(0x42);
        let signature = signer.sign_safe_hash(hash).await.unwrap();

        assert_eq!(signature.len(), 65);
        assert!(signature[64] == 31 || signature[64] == 32);

        let mut raw = signature.to_vec();
        raw[64] -= 4;
        let recovered = Signature::try_from(raw.as_slice())
            .unwrap()
            .recover_address_from_msg(hash.as_slice())
            .unwrap();
        assert_eq!(recovered, signer.proposer());
    }
}
