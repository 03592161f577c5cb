//! Multi-chain wiring runs.
//!
//! A run moves through [`Phase`]s: the metadata is loaded, chain configurations are built, the
//! mesh is planned and every destination is then validated, built and handed to the executor.
//! The first error aborts the run. In direct mode transactions of earlier destinations stay on
//! chain and are returned in [`WireError::Partial`], in Safe mode nothing is proposed.

use crate::{
    chains::{ChainConfig, ChainConfigBuilder, ChainConfigs},
    config::WireConfig,
    error::{TopologyError, WireError},
    executor::{ExecutionMode, Executor, Submission},
    metadata::MetadataTable,
    topology::{Plan, TopologyPlanner},
    transactions::{build_peer_and_options, build_set_delegate, build_wire_operation},
    validator::{EndpointReader, check_libraries},
};
use alloy::primitives::{Address, ChainId};
use strum::Display;
use tracing::{error, info, warn};

/// Phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    /// The metadata is loaded.
    MetadataLoaded,
    /// Chain configurations are built.
    ConfigsBuilt,
    /// Source and destinations are known.
    Planned,
    /// Checking on-chain preconditions of a destination.
    Validating,
    /// Building the calls of a destination.
    Building,
    /// Broadcasting the calls of a destination.
    Executing,
    /// Collecting calls for a Safe proposal.
    Proposing,
    /// The run completed.
    Done,
}

/// The chains to wire and where the signer is connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// Requested chain keys. May include the source.
    pub chains: Vec<String>,
    /// The expected source chain key.
    pub network: Option<String>,
    /// Chain id reported by the connected RPC.
    pub current_chain_id: ChainId,
}

/// Outcome of a single destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationReport {
    /// Destination chain key.
    pub destination: String,
    /// Destination endpoint id.
    pub eid: u32,
    /// What happened to each call.
    pub submissions: Vec<Submission>,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireReport {
    /// Source chain key.
    pub source: String,
    /// How transactions were executed.
    pub mode: ExecutionMode,
    /// Per destination outcome, in processing order.
    pub destinations: Vec<DestinationReport>,
    /// Submissions made when the run finished, i.e. Safe proposals.
    pub finalized: Vec<Submission>,
}

impl WireReport {
    /// Total number of calls submitted for all destinations.
    pub fn transaction_count(&self) -> usize {
        self.destinations.iter().map(|dest| dest.submissions.len()).sum()
    }

    /// Number of Safe proposals made.
    pub fn proposal_count(&self) -> usize {
        self.finalized.iter().filter(|sub| matches!(sub, Submission::Proposed { .. })).count()
    }

    /// Logs a summary of the run.
    pub fn log(&self) {
        for submission in &self.finalized {
            if let Submission::Proposed { safe, safe_tx_hash, calls } = submission {
                info!(%safe, %safe_tx_hash, calls, "Safe proposal pending confirmation");
            }
        }
        info!(
            source = %self.source,
            mode = %self.mode,
            destinations = self.destinations.len(),
            transactions = self.transaction_count(),
            proposals = self.proposal_count(),
            "Run complete"
        );
    }
}

/// Drives wiring runs.
#[derive(Debug)]
pub struct Orchestrator {
    metadata: MetadataTable,
    builder: ChainConfigBuilder,
    phase: Phase,
}

impl Orchestrator {
    /// Creates an orchestrator over already loaded metadata.
    pub fn new(metadata: MetadataTable, builder: ChainConfigBuilder) -> Self {
        Self { metadata, builder, phase: Phase::MetadataLoaded }
    }

    /// Loads the metadata and token registry referenced by the configuration.
    pub fn from_config(config: &WireConfig) -> Result<Self, WireError> {
        let metadata = config.load_metadata()?;
        let builder = ChainConfigBuilder::new(config.tokens.clone())
            .with_required_dvns(config.dvns.clone())
            .with_missing_address_policy(config.missing_address_policy);
        Ok(Self::new(metadata, builder))
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The loaded metadata.
    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    fn transition(&mut self, phase: Phase) {
        info!(from = %self.phase, to = %phase, "Wiring phase");
        self.phase = phase;
    }

    /// Builds the chain configurations.
    pub fn build_configs(&mut self, include_validators: bool) -> Result<ChainConfigs, WireError> {
        let configs = self.builder.build_all(&self.metadata, include_validators)?;
        self.transition(Phase::ConfigsBuilt);
        Ok(configs)
    }

    fn plan(&mut self, configs: &ChainConfigs, request: &WireRequest) -> Result<Plan, WireError> {
        let plan = TopologyPlanner::new(configs).plan(
            &request.chains,
            request.current_chain_id,
            request.network.as_deref(),
        )?;
        info!(
            source = %plan.source.chain_key,
            eid = plan.source.eid,
            destinations = ?plan.destination_keys(),
            "Planned mesh"
        );
        self.transition(Phase::Planned);
        Ok(plan)
    }

    /// Builds the configurations and plans the mesh of `request` without submitting anything.
    pub fn plan_request(&mut self, request: &WireRequest) -> Result<Plan, WireError> {
        let configs = self.build_configs(true)?;
        self.plan(&configs, request)
    }

    fn submit_phase(mode: ExecutionMode) -> Phase {
        match mode {
            ExecutionMode::Direct => Phase::Executing,
            ExecutionMode::Safe => Phase::Proposing,
        }
    }

    /// Wires the source chain to every requested destination.
    ///
    /// Each destination gets six calls on the source chain: send library, send config, receive
    /// library, receive config, peer and enforced options. The endpoint's default libraries are
    /// checked before the calls of each destination are submitted.
    pub async fn wire(
        &mut self,
        request: &WireRequest,
        endpoint: &dyn EndpointReader,
        executor: &mut dyn Executor,
    ) -> Result<WireReport, WireError> {
        let configs = self.build_configs(true)?;
        let plan = self.plan(&configs, request)?;
        let source = &plan.source;
        let oapp = source
            .token
            .ok_or_else(|| TopologyError::MissingTokenAddress(source.chain_key.clone()))?;

        executor.prepare().await?;

        let mut destinations = Vec::with_capacity(plan.destinations.len());
        for dest in &plan.destinations {
            let outcome = self.wire_destination(endpoint, executor, source, dest, oapp).await;
            complete_destination(source, dest, outcome, &mut destinations)?;
        }

        let description = format!(
            "Wire {} to {} chain(s) ({})",
            source.chain_key,
            plan.destinations.len(),
            plan.destination_keys().join(", ")
        );
        let finalized = executor.finish(&description).await?;
        self.transition(Phase::Done);

        Ok(WireReport {
            source: source.chain_key.clone(),
            mode: executor.mode(),
            destinations,
            finalized,
        })
    }

    async fn wire_destination(
        &mut self,
        endpoint: &dyn EndpointReader,
        executor: &mut dyn Executor,
        source: &ChainConfig,
        dest: &ChainConfig,
        oapp: Address,
    ) -> Result<Vec<Submission>, WireError> {
        self.transition(Phase::Validating);
        check_libraries(endpoint, source, dest).await?;

        self.transition(Phase::Building);
        let dest_token = dest
            .token
            .ok_or_else(|| TopologyError::MissingTokenAddress(dest.chain_key.clone()))?;
        let txs = build_wire_operation(source, dest, oapp, dest_token)?;
        info!(
            source = %source.chain_key,
            source_eid = source.eid,
            destination = %dest.chain_key,
            destination_eid = dest.eid,
            transactions = txs.len(),
            "Prepared pathway"
        );

        self.transition(Self::submit_phase(executor.mode()));
        executor.submit(&dest.chain_key, txs).await
    }

    /// Sets peers and enforced options only.
    ///
    /// Validators are not resolved and the endpoint is not consulted.
    pub async fn peer_options(
        &mut self,
        request: &WireRequest,
        executor: &mut dyn Executor,
    ) -> Result<WireReport, WireError> {
        let configs = self.build_configs(false)?;
        let plan = self.plan(&configs, request)?;
        let source = &plan.source;
        let oapp = source
            .token
            .ok_or_else(|| TopologyError::MissingTokenAddress(source.chain_key.clone()))?;

        executor.prepare().await?;

        let mut destinations = Vec::with_capacity(plan.destinations.len());
        for dest in &plan.destinations {
            let outcome = self.peer_destination(executor, dest, oapp).await;
            complete_destination(source, dest, outcome, &mut destinations)?;
        }

        let description = format!(
            "Set peers and enforced options for {} to {} chain(s) ({})",
            source.chain_key,
            plan.destinations.len(),
            plan.destination_keys().join(", ")
        );
        let finalized = executor.finish(&description).await?;
        self.transition(Phase::Done);

        Ok(WireReport {
            source: source.chain_key.clone(),
            mode: executor.mode(),
            destinations,
            finalized,
        })
    }

    async fn peer_destination(
        &mut self,
        executor: &mut dyn Executor,
        dest: &ChainConfig,
        oapp: Address,
    ) -> Result<Vec<Submission>, WireError> {
        self.transition(Phase::Building);
        let dest_token = dest
            .token
            .ok_or_else(|| TopologyError::MissingTokenAddress(dest.chain_key.clone()))?;
        let txs = build_peer_and_options(oapp, dest, dest_token).to_vec();

        self.transition(Self::submit_phase(executor.mode()));
        executor.submit(&dest.chain_key, txs).await
    }

    /// Sets the endpoint delegate of the token on the connected chain.
    pub async fn set_delegate(
        &mut self,
        current_chain_id: ChainId,
        delegate: Address,
        executor: &mut dyn Executor,
    ) -> Result<WireReport, WireError> {
        let configs = self.build_configs(false)?;
        let source = configs.by_chain_id(current_chain_id).ok_or(
            TopologyError::SourceChainMismatch {
                network: None,
                connected: current_chain_id,
                configured: None,
            },
        )?;
        let oapp = source
            .token
            .ok_or_else(|| TopologyError::MissingTokenAddress(source.chain_key.clone()))?;
        self.transition(Phase::Planned);

        if delegate == Address::ZERO {
            warn!(chain = %source.chain_key, "Clearing the endpoint delegate");
        }

        executor.prepare().await?;
        self.transition(Phase::Building);
        let tx = build_set_delegate(oapp, delegate);

        self.transition(Self::submit_phase(executor.mode()));
        let submissions = executor.submit(&source.chain_key, vec![tx]).await?;
        let finalized = executor
            .finish(&format!("Set delegate of {} to {delegate}", source.chain_key))
            .await?;
        self.transition(Phase::Done);

        Ok(WireReport {
            source: source.chain_key.clone(),
            mode: executor.mode(),
            destinations: vec![DestinationReport {
                destination: source.chain_key.clone(),
                eid: source.eid,
                submissions,
            }],
            finalized,
        })
    }
}

/// Logs the outcome of `dest` and records it in `completed`.
///
/// A failure after at least one completed destination is returned as [`WireError::Partial`].
fn complete_destination(
    source: &ChainConfig,
    dest: &ChainConfig,
    outcome: Result<Vec<Submission>, WireError>,
    completed: &mut Vec<DestinationReport>,
) -> Result<(), WireError> {
    match outcome {
        Ok(submissions) => {
            info!(
                source = %source.chain_key,
                destination = %dest.chain_key,
                eid = dest.eid,
                transactions = submissions.len(),
                "Destination done"
            );
            completed.push(DestinationReport {
                destination: dest.chain_key.clone(),
                eid: dest.eid,
                submissions,
            });
            Ok(())
        }
        Err(err) => {
            let done: Vec<_> = completed.iter().map(|d| d.destination.as_str()).collect();
            error!(
                source = %source.chain_key,
                destination = %dest.chain_key,
                eid = dest.eid,
                completed = ?done,
                %err,
                "Destination failed"
            );
            if completed.is_empty() {
                return Err(err);
            }
            Err(WireError::Partial { completed: std::mem::take(completed), source: Box::new(err) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::TokenDeployment,
        error::{ErrorKind, PreconditionError, SafeError, SubmissionError},
        transactions::{OperationCategory, PendingTransaction},
    };
    use alloy::primitives::{B256, address};
    use async_trait::async_trait;
    use std::{
        collections::BTreeMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    const METADATA: &str = include_str!("../tests/fixtures/metadata.json");

    /// Records submissions and proposes everything as one batch on finish.
    #[derive(Debug, Default)]
    struct RecordingExecutor {
        submitted: Vec<(String, PendingTransaction)>,
        finished: Vec<String>,
        prepared: bool,
    }

    #[async_trait]
    impl Executor for RecordingExecutor {
        fn mode(&self) -> ExecutionMode {
            ExecutionMode::Safe
        }

        async fn prepare(&mut self) -> Result<(), WireError> {
            self.prepared = true;
            Ok(())
        }

        async fn submit(
            &mut self,
            destination: &str,
            txs: Vec<PendingTransaction>,
        ) -> Result<Vec<Submission>, WireError> {
            let submissions =
                txs.iter().map(|tx| Submission::Queued { label: tx.label.clone() }).collect();
            self.submitted.extend(txs.into_iter().map(|tx| (destination.to_string(), tx)));
            Ok(submissions)
        }

        async fn finish(&mut self, description: &str) -> Result<Vec<Submission>, WireError> {
            self.finished.push(description.to_string());
            if self.submitted.is_empty() {
                return Ok(Vec::new());
            }
            Ok(vec![Submission::Proposed {
                safe: Address::repeat_byte(0x5a),
                safe_tx_hash: B256::ZERO,
                calls: self.submitted.len(),
            }])
        }
    }

    /// Confirms calls one at a time and fails to send the first call towards `failing`.
    #[derive(Debug)]
    struct FlakyDirectExecutor {
        failing: &'static str,
        sent: Vec<(String, String)>,
        finished: bool,
    }

    impl FlakyDirectExecutor {
        fn new(failing: &'static str) -> Self {
            Self { failing, sent: Vec::new(), finished: false }
        }
    }

    #[async_trait]
    impl Executor for FlakyDirectExecutor {
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
                if destination == self.failing {
                    return Err(SubmissionError::Send {
                        destination: destination.to_string(),
                        label: tx.label,
                        reason: "connection reset".to_string(),
                    }
                    .into());
                }
                self.sent.push((destination.to_string(), tx.label.clone()));
                submissions.push(Submission::Confirmed {
                    label: tx.label,
                    tx_hash: B256::with_last_byte(self.sent.len() as u8),
                });
            }
            Ok(submissions)
        }

        async fn finish(&mut self, _description: &str) -> Result<Vec<Submission>, WireError> {
            self.finished = true;
            Ok(Vec::new())
        }
    }

    /// Reports fixed default libraries.
    struct StaticEndpoint {
        send: Address,
        receive: Address,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl EndpointReader for StaticEndpoint {
        async fn default_send_library(
            &self,
            _endpoint: Address,
            _eid: u32,
        ) -> Result<Address, WireError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.send)
        }

        async fn default_receive_library(
            &self,
            _endpoint: Address,
            _eid: u32,
        ) -> Result<Address, WireError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.receive)
        }
    }

    fn sonic_endpoint() -> StaticEndpoint {
        StaticEndpoint {
            send: address!("0xC39161c743D0307EB9BCc9FEF03eeb9Dc4802de7"),
            receive: address!("0xe1844c5D63a9543023008D332Bd3d2e6f1FE1043"),
            reads: AtomicUsize::new(0),
        }
    }

    fn tokens() -> BTreeMap<ChainId, TokenDeployment> {
        BTreeMap::from([
            (
                146,
                TokenDeployment {
                    address: address!("0x1111111111111111111111111111111111111111"),
                    confirmations: 20,
                },
            ),
            (
                43114,
                TokenDeployment {
                    address: address!("0x2222222222222222222222222222222222222222"),
                    confirmations: 12,
                },
            ),
            (
                43113,
                TokenDeployment {
                    address: address!("0x3333333333333333333333333333333333333333"),
                    confirmations: 1,
                },
            ),
        ])
    }

    fn orchestrator(tokens: BTreeMap<ChainId, TokenDeployment>) -> Orchestrator {
        Orchestrator::new(
            MetadataTable::from_json_str(METADATA).unwrap(),
            ChainConfigBuilder::new(tokens),
        )
    }

    fn request(chains: &[&str]) -> WireRequest {
        WireRequest {
            chains: chains.iter().map(|key| key.to_string()).collect(),
            network: Some("sonic".to_string()),
            current_chain_id: 146,
        }
    }

    #[tokio::test]
    async fn sonic_to_avalanche() {
        let mut orchestrator = orchestrator(tokens());
        let mut executor = RecordingExecutor::default();
        let endpoint = sonic_endpoint();

        let report = orchestrator
            .wire(&request(&["sonic", "avalanche"]), &endpoint, &mut executor)
            .await
            .unwrap();

        assert_eq!(orchestrator.phase(), Phase::Done);
        assert!(executor.prepared);
        assert_eq!(report.source, "sonic");
        assert_eq!(report.destinations.len(), 1);
        assert_eq!(report.destinations[0].eid, 30106);
        assert_eq!(report.transaction_count(), 6);
        assert_eq!(endpoint.reads.load(Ordering::SeqCst), 2);

        let categories =
            executor.submitted.iter().map(|(_, tx)| tx.category).collect::<Vec<_>>();
        assert_eq!(
            categories,
            [[OperationCategory::Endpoint; 4].as_slice(), &[OperationCategory::Peer; 2]].concat()
        );
        let endpoint_address = address!("0x6F475642a6e85809B1c36Fa62763669b1b48DD5B");
        assert!(executor.submitted[..4].iter().all(|(_, tx)| tx.to == endpoint_address));
        assert!(
            executor.submitted[4..]
                .iter()
                .all(|(_, tx)| tx.to == address!("0x1111111111111111111111111111111111111111"))
        );
    }

    #[tokio::test]
    async fn twelve_transactions_in_one_proposal() {
        let mut orchestrator = orchestrator(tokens());
        let mut executor = RecordingExecutor::default();

        let report = orchestrator
            .wire(
                &request(&["sonic", "avalanche", "avalanche-testnet"]),
                &sonic_endpoint(),
                &mut executor,
            )
            .await
            .unwrap();

        assert_eq!(report.transaction_count(), 12);
        assert_eq!(report.proposal_count(), 1);
        assert_eq!(
            report.finalized,
            vec![Submission::Proposed {
                safe: Address::repeat_byte(0x5a),
                safe_tx_hash: B256::ZERO,
                calls: 12
            }]
        );
        assert_eq!(
            executor.finished,
            vec!["Wire sonic to 2 chain(s) (avalanche, avalanche-testnet)".to_string()]
        );
    }

    #[tokio::test]
    async fn library_mismatch_submits_nothing() {
        let mut orchestrator = orchestrator(tokens());
        let mut executor = RecordingExecutor::default();
        let endpoint = StaticEndpoint { receive: Address::ZERO, ..sonic_endpoint() };

        let err = orchestrator
            .wire(&request(&["sonic", "avalanche"]), &endpoint, &mut executor)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WireError::Precondition(PreconditionError::LibraryMismatch { destination, .. })
                if destination == "avalanche"
        ));
        assert_eq!(orchestrator.phase(), Phase::Validating);
        assert!(executor.submitted.is_empty());
        assert!(executor.finished.is_empty());
    }

    #[tokio::test]
    async fn direct_failure_keeps_earlier_destinations() {
        let mut orchestrator = orchestrator(tokens());
        let mut executor = FlakyDirectExecutor::new("avalanche-testnet");

        let err = orchestrator
            .wire(
                &request(&["sonic", "avalanche", "avalanche-testnet"]),
                &sonic_endpoint(),
                &mut executor,
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SubmissionFailure);
        assert_eq!(orchestrator.phase(), Phase::Executing);
        assert!(!executor.finished);

        assert_eq!(executor.sent.len(), 6);
        assert!(executor.sent.iter().all(|(dest, _)| dest == "avalanche"));

        let WireError::Partial { completed, source } = err else {
            panic!("expected a partial run, got {err:?}");
        };
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].destination, "avalanche");
        assert_eq!(completed[0].eid, 30106);
        assert_eq!(completed[0].submissions.len(), 6);
        assert!(matches!(
            *source,
            WireError::Submission(SubmissionError::Send { destination, .. })
                if destination == "avalanche-testnet"
        ));
    }

    #[tokio::test]
    async fn direct_failure_on_first_destination_is_not_partial() {
        let mut orchestrator = orchestrator(tokens());
        let mut executor = FlakyDirectExecutor::new("avalanche");

        let err = orchestrator
            .wire(
                &request(&["sonic", "avalanche", "avalanche-testnet"]),
                &sonic_endpoint(),
                &mut executor,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, WireError::Submission(SubmissionError::Send { .. })));
        assert!(err.completed().is_empty());
        assert!(executor.sent.is_empty());
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_read() {
        let mut tokens = tokens();
        tokens.remove(&43114);
        let mut orchestrator = orchestrator(tokens);
        let mut executor = RecordingExecutor::default();
        let endpoint = sonic_endpoint();

        let err = orchestrator
            .wire(&request(&["sonic", "avalanche"]), &endpoint, &mut executor)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WireError::Topology(TopologyError::MissingTokenAddress(key)) if key == "avalanche"
        ));
        assert_eq!(endpoint.reads.load(Ordering::SeqCst), 0);
        assert!(!executor.prepared);
        assert!(executor.submitted.is_empty());
    }

    #[tokio::test]
    async fn peer_options_only() {
        let mut orchestrator = orchestrator(tokens());
        let mut executor = RecordingExecutor::default();

        let report = orchestrator
            .peer_options(&request(&["avalanche", "sonic", "avalanche-testnet"]), &mut executor)
            .await
            .unwrap();

        assert_eq!(report.transaction_count(), 4);
        assert!(executor.submitted.iter().all(|(_, tx)| tx.category == OperationCategory::Peer));
        assert_eq!(
            executor.submitted.iter().map(|(dest, _)| dest.as_str()).collect::<Vec<_>>(),
            vec!["avalanche", "avalanche", "avalanche-testnet", "avalanche-testnet"]
        );
    }

    #[tokio::test]
    async fn set_delegate_on_connected_chain() {
        let mut orchestrator = orchestrator(tokens());
        let mut executor = RecordingExecutor::default();
        let delegate = Address::repeat_byte(0xde);

        let report = orchestrator.set_delegate(43114, delegate, &mut executor).await.unwrap();
        assert_eq!(report.source, "avalanche");
        assert_eq!(executor.submitted.len(), 1);
        assert_eq!(
            executor.submitted[0].1.to,
            address!("0x2222222222222222222222222222222222222222")
        );

        let err = orchestrator.set_delegate(1, delegate, &mut executor).await.unwrap_err();
        assert!(matches!(err, WireError::Topology(TopologyError::SourceChainMismatch { .. })));
    }

    #[tokio::test]
    async fn safe_init_failure_aborts_before_validation() {
        #[derive(Debug)]
        struct Uninitialized;

        #[async_trait]
        impl Executor for Uninitialized {
            fn mode(&self) -> ExecutionMode {
                ExecutionMode::Safe
            }

            async fn prepare(&mut self) -> Result<(), WireError> {
                Err(SafeError::NotInitialized.into())
            }

            async fn submit(
                &mut self,
                _destination: &str,
                _txs: Vec<PendingTransaction>,
            ) -> Result<Vec<Submission>, WireError> {
                unreachable!()
            }

            async fn finish(&mut self, _description: &str) -> Result<Vec<Submission>, WireError> {
                unreachable!()
            }
        }

        let endpoint = sonic_endpoint();
        let err = orchestrator(tokens())
            .wire(&request(&["sonic", "avalanche"]), &endpoint, &mut Uninitialized)
            .await
            .unwrap_err();
        assert!(matches!(err, WireError::Safe(SafeError::NotInitialized)));
        assert_eq!(endpoint.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fixture_configs() {
        let configs = orchestrator(tokens()).build_configs(true).unwrap();
        let keys = configs
            .iter()
            .map(|config: &ChainConfig| config.chain_key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["avalanche", "avalanche-testnet", "sonic"]);

        let sonic = configs.get("sonic").unwrap();
        assert_eq!(
            sonic.dvns,
            vec![
                address!("0x05aaefdf9db6e0f7d27fa3b6ee099edb33da029e"),
                address!("0x282b3386571f7f794450d5789911a9804fa346b4"),
            ]
        );
    }
}
