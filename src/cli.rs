//! # omniwire CLI
use crate::{
    config::WireConfig,
    diagnostics::run_diagnostics,
    error::SafeError,
    executor::{DirectExecutor, Executor, SafeExecutor},
    metadata::MetadataTable,
    orchestrator::{Orchestrator, WireRequest},
    safe::{SafeManager, SafeRole, SafeSecrets, SafeServiceClient},
    signers::SignerSource,
    topology::parse_chain_list,
    validator::OnchainEndpoint,
};
use alloy::{
    network::EthereumWallet,
    primitives::{Address, ChainId},
    providers::{DynProvider, Provider, ProviderBuilder},
};
use alloy_chains::Chain;
use clap::{Args as ClapArgs, Parser, Subcommand};
use eyre::{OptionExt, WrapErr, bail};
use std::{path::PathBuf, sync::Arc};
use tracing::info;
use url::Url;

/// Wires omnichain tokens across LayerZero V2 chains.
#[derive(Debug, Parser)]
#[command(author, version, about = "omniwire", long_about = None)]
pub struct Args {
    /// The configuration file.
    #[arg(
        long,
        value_name = "CONFIG",
        env = "OMNIWIRE_CONFIG",
        default_value = "omniwire.yaml",
        global = true
    )]
    pub config: PathBuf,
    /// Chain key of the connected network.
    ///
    /// Used to pick the RPC endpoint when `--rpc-url` is missing, and must match the chain the
    /// endpoint is connected to.
    #[arg(long, value_name = "CHAIN_KEY", env = "NETWORK", global = true)]
    pub network: Option<String>,
    /// The RPC endpoint of the connected chain.
    #[arg(long = "rpc-url", value_name = "RPC_ENDPOINT", env = "RPC_URL", global = true)]
    pub rpc_url: Option<Url>,
    /// Wallet used to send transactions in direct mode.
    #[command(flatten)]
    pub wallet: WalletArgs,
    /// Safe proposal credentials.
    #[command(flatten)]
    pub safe: SafeArgs,
    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Wallet credentials. The first configured source is used.
#[derive(Debug, Clone, ClapArgs)]
pub struct WalletArgs {
    /// Path to an encrypted JSON keystore.
    #[arg(long = "keystore", value_name = "PATH", env = "KEYSTORE_PATH", global = true)]
    pub keystore_path: Option<PathBuf>,
    /// Password of the keystore.
    #[arg(
        long,
        value_name = "PASSWORD",
        env = "KEYSTORE_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub keystore_password: Option<String>,
    /// Mnemonic, the first account is used.
    #[arg(long, value_name = "MNEMONIC", env = "MNEMONIC", hide_env_values = true, global = true)]
    pub mnemonic: Option<String>,
    /// Raw private key.
    #[arg(long, value_name = "KEY", env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    pub private_key: Option<String>,
    /// AWS KMS key id.
    #[arg(long = "kms-key-id", value_name = "KEY_ID", env = "KMS_KEY_ID", global = true)]
    pub kms_key_id: Option<String>,
}

impl WalletArgs {
    fn source(&self) -> Option<SignerSource> {
        SignerSource::select(
            self.keystore_path.clone(),
            self.keystore_password.clone(),
            self.mnemonic.clone(),
            self.private_key.clone(),
            self.kms_key_id.clone(),
        )
    }
}

/// Safe Transaction Service credentials.
#[derive(Debug, Clone, ClapArgs)]
pub struct SafeArgs {
    /// Safe Transaction Service URL, overriding the configured or hosted one.
    #[arg(long = "safe-service-url", value_name = "URL", env = "SAFE_SERVICE_URL", global = true)]
    pub service_url: Option<Url>,
    /// API key of the Safe Transaction Service.
    #[arg(
        long = "safe-api-key",
        value_name = "KEY",
        env = "SAFE_API_KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,
    /// Private key of the proposer, an owner of the Safes.
    #[arg(
        long = "proposer-key",
        value_name = "KEY",
        env = "PRIVATE_KEY_PROPOSER",
        hide_env_values = true,
        global = true
    )]
    pub proposer_key: Option<String>,
    /// Safe owning the token.
    #[arg(long = "safe-owner", value_name = "ADDRESS", env = "SAFE_OWNER_ADDRESS", global = true)]
    pub owner: Option<Address>,
    /// Safe acting as the endpoint delegate of the token.
    #[arg(
        long = "safe-delegate",
        value_name = "ADDRESS",
        env = "SAFE_DELEGATE_ADDRESS",
        global = true
    )]
    pub delegate: Option<Address>,
}

impl SafeArgs {
    fn secrets(&self) -> SafeSecrets {
        SafeSecrets {
            api_key: self.api_key.clone(),
            proposer_key: self.proposer_key.clone(),
            owner: self.owner,
            delegate: self.delegate,
        }
    }
}

/// Commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wire the connected chain to every other listed chain.
    Wire {
        /// Comma separated chain keys.
        #[arg(long, value_name = "CHAINS")]
        chains: String,
        /// Propose the transactions to the Safes instead of sending them.
        #[arg(long)]
        safe: bool,
    },
    /// Set only peers and enforced options.
    PeerOptions {
        /// Comma separated chain keys.
        #[arg(long, value_name = "CHAINS")]
        chains: String,
        /// Propose the transactions to the owner Safe instead of sending them.
        #[arg(long)]
        safe: bool,
    },
    /// Set the endpoint delegate of the token on the connected chain.
    SetDelegate {
        /// The new delegate.
        #[arg(long, value_name = "ADDRESS")]
        account: Address,
        /// Propose the transaction to the owner Safe instead of sending it.
        #[arg(long)]
        safe: bool,
    },
    /// Compare the on-chain pathway configuration with the expected one.
    Inspect {
        /// Comma separated chain keys.
        #[arg(long, value_name = "CHAINS")]
        chains: String,
    },
    /// Print the chain configurations derived from the metadata.
    Summary,
}

impl Args {
    /// Runs the command.
    pub async fn run(self) -> eyre::Result<()> {
        let config = WireConfig::load_from_file(&self.config)?
            .with_safe_service_url(self.safe.service_url.clone());
        let mut orchestrator = Orchestrator::from_config(&config)?;

        match &self.command {
            Command::Summary => {
                orchestrator.build_configs(true)?.log_summary();
            }
            Command::Wire { chains, safe } => {
                let (provider, url, chain_id) =
                    self.connect(&config, orchestrator.metadata()).await?;
                let endpoint = OnchainEndpoint::new(provider.clone());
                let roles = [SafeRole::Owner, SafeRole::Delegate];
                let mut executor =
                    self.executor(&config, provider, url, chain_id, *safe, roles).await?;

                let report = orchestrator
                    .wire(&self.request(chains, chain_id), &endpoint, executor.as_mut())
                    .await?;
                report.log();
            }
            Command::PeerOptions { chains, safe } => {
                let (provider, url, chain_id) =
                    self.connect(&config, orchestrator.metadata()).await?;
                let mut executor = self
                    .executor(&config, provider, url, chain_id, *safe, [SafeRole::Owner])
                    .await?;

                let report = orchestrator
                    .peer_options(&self.request(chains, chain_id), executor.as_mut())
                    .await?;
                report.log();
            }
            Command::SetDelegate { account, safe } => {
                let (provider, url, chain_id) =
                    self.connect(&config, orchestrator.metadata()).await?;
                let mut executor = self
                    .executor(&config, provider, url, chain_id, *safe, [SafeRole::Owner])
                    .await?;

                let report =
                    orchestrator.set_delegate(chain_id, *account, executor.as_mut()).await?;
                report.log();
            }
            Command::Inspect { chains } => {
                let (provider, _, chain_id) =
                    self.connect(&config, orchestrator.metadata()).await?;
                let plan = orchestrator.plan_request(&self.request(chains, chain_id))?;

                let report = run_diagnostics(&plan, &provider).await?;
                report.log();
                if report.has_errors() {
                    bail!("{} has unwired pathways", plan.source.chain_key);
                }
            }
        }

        Ok(())
    }

    fn request(&self, chains: &str, current_chain_id: ChainId) -> WireRequest {
        WireRequest {
            chains: parse_chain_list(chains),
            network: self.network.clone(),
            current_chain_id,
        }
    }

    /// Connects a read-only provider to the selected chain.
    async fn connect(
        &self,
        config: &WireConfig,
        metadata: &MetadataTable,
    ) -> eyre::Result<(DynProvider, Url, ChainId)> {
        let url = match (&self.rpc_url, &self.network) {
            (Some(url), _) => url.clone(),
            (None, Some(network)) => config.rpc_url(network, metadata)?,
            (None, None) => bail!("either --rpc-url or --network is required"),
        };

        let provider = ProviderBuilder::new().connect_http(url.clone()).erased();
        let chain_id = provider
            .get_chain_id()
            .await
            .wrap_err_with(|| format!("failed to connect to {url}"))?;
        info!(%url, chain = %Chain::from_id(chain_id), "Connected");

        Ok((provider, url, chain_id))
    }

    async fn executor(
        &self,
        config: &WireConfig,
        provider: DynProvider,
        url: Url,
        chain_id: ChainId,
        safe: bool,
        roles: impl IntoIterator<Item = SafeRole>,
    ) -> eyre::Result<Box<dyn Executor>> {
        if safe {
            let service_url =
                config.safe.service_url(chain_id).ok_or(SafeError::UnsupportedChain(chain_id))?;
            let backend =
                SafeServiceClient::new(service_url, self.safe.api_key.clone(), provider);
            let manager = SafeManager::new(
                chain_id,
                config.safe.multi_send,
                self.safe.secrets(),
                Arc::new(backend),
            )
            .with_roles(roles);
            return Ok(Box::new(SafeExecutor::new(manager)));
        }

        let signer = self
            .wallet
            .source()
            .ok_or_eyre(
                "no wallet configured, set KEYSTORE_PATH and KEYSTORE_PASSWORD, MNEMONIC, \
                 PRIVATE_KEY or KMS_KEY_ID",
            )?
            .load(Some(chain_id))
            .await?;
        info!(address = %signer.address(), "Loaded wallet");

        let provider =
            ProviderBuilder::new().wallet(EthereumWallet::new(signer.0)).connect_http(url).erased();
        Ok(Box::new(DirectExecutor::new(provider)))
    }
}
