//! End to end wiring runs against the metadata fixture, with the chain and the Safe service
//! replaced by in-memory fakes.

use alloy::{
    primitives::{Address, U256, address},
    sol_types::SolCall,
};
use async_trait::async_trait;
use omniwire::{
    config::WireConfig,
    constants::MULTI_SEND_CALL_ONLY,
    contracts::IMultiSend,
    error::{ErrorKind, SafeError, WireError},
    executor::{ExecutionMode, SafeExecutor, Submission},
    orchestrator::{Orchestrator, Phase, WireRequest},
    safe::{SafeBackend, SafeManager, SafeProposal, SafeSecrets, encode_multi_send},
    transactions::build_wire_operation,
    validator::EndpointReader,
};
use std::sync::{Arc, Mutex};

const SONIC_ENDPOINT: Address = address!("0x6F475642a6e85809B1c36Fa62763669b1b48DD5B");

const PROPOSER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

#[derive(Default)]
struct RecordingBackend {
    proposals: Mutex<Vec<SafeProposal>>,
}

impl RecordingBackend {
    fn proposals(&self) -> Vec<SafeProposal> {
        self.proposals.lock().unwrap().clone()
    }
}

#[async_trait]
impl SafeBackend for RecordingBackend {
    async fn nonce(&self, _safe: Address) -> Result<U256, SafeError> {
        Ok(U256::from(42))
    }

    async fn propose(&self, proposal: &SafeProposal) -> Result<(), SafeError> {
        self.proposals.lock().unwrap().push(proposal.clone());
        Ok(())
    }
}

struct Endpoint {
    send: Address,
    receive: Address,
}

#[async_trait]
impl EndpointReader for Endpoint {
    async fn default_send_library(
        &self,
        endpoint: Address,
        _eid: u32,
    ) -> Result<Address, WireError> {
        assert_eq!(endpoint, SONIC_ENDPOINT);
        Ok(self.send)
    }

    async fn default_receive_library(
        &self,
        endpoint: Address,
        _eid: u32,
    ) -> Result<Address, WireError> {
        assert_eq!(endpoint, SONIC_ENDPOINT);
        Ok(self.receive)
    }
}

fn sonic_endpoint() -> Endpoint {
    Endpoint {
        send: address!("0xC39161c743D0307EB9BCc9FEF03eeb9Dc4802de7"),
        receive: address!("0xe1844c5D63a9543023008D332Bd3d2e6f1FE1043"),
    }
}

fn config() -> WireConfig {
    WireConfig::load_from_file("tests/fixtures/wire.yaml").unwrap()
}

fn safe_executor(
    owner: Address,
    delegate: Address,
    backend: Arc<RecordingBackend>,
) -> SafeExecutor {
    let secrets = SafeSecrets {
        api_key: Some("api-key".to_string()),
        proposer_key: Some(PROPOSER_KEY.to_string()),
        owner: Some(owner),
        delegate: Some(delegate),
    };
    SafeExecutor::new(SafeManager::new(146, MULTI_SEND_CALL_ONLY, secrets, backend))
}

fn request() -> WireRequest {
    WireRequest {
        chains: vec!["sonic".to_string(), "avalanche".to_string()],
        network: Some("sonic".to_string()),
        current_chain_id: 146,
    }
}

#[tokio::test]
async fn shared_safe_receives_one_multi_send() {
    let config = config();
    let backend = Arc::new(RecordingBackend::default());
    let safe = Address::repeat_byte(0x5a);
    let mut executor = safe_executor(safe, safe, backend.clone());

    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    let report = orchestrator.wire(&request(), &sonic_endpoint(), &mut executor).await.unwrap();

    assert_eq!(orchestrator.phase(), Phase::Done);
    assert_eq!(report.mode, ExecutionMode::Safe);
    assert_eq!(report.transaction_count(), 6);
    assert_eq!(report.proposal_count(), 1);

    let proposals = backend.proposals();
    assert_eq!(proposals.len(), 1);
    let proposal = &proposals[0];
    assert_eq!(proposal.safe, safe);
    assert_eq!(proposal.calls, 6);
    assert_eq!(proposal.tx.to, MULTI_SEND_CALL_ONLY);
    assert_eq!(proposal.tx.operation, 1);
    assert_eq!(proposal.tx.nonce, U256::from(42));
    assert_eq!(proposal.origin, "Wire sonic to 1 chain(s) (avalanche)");

    let configs = orchestrator.build_configs(true).unwrap();
    let sonic = configs.get("sonic").unwrap();
    let avalanche = configs.get("avalanche").unwrap();
    let expected = build_wire_operation(
        sonic,
        avalanche,
        sonic.token.unwrap(),
        avalanche.token.unwrap(),
    )
    .unwrap();
    let call = IMultiSend::multiSendCall::abi_decode(&proposal.tx.data).unwrap();
    assert_eq!(call.transactions, encode_multi_send(&expected));
}

#[tokio::test]
async fn owner_and_delegate_safes_split_the_run() {
    let config = config();
    let backend = Arc::new(RecordingBackend::default());
    let owner = Address::repeat_byte(0x0a);
    let delegate = Address::repeat_byte(0x0b);
    let mut executor = safe_executor(owner, delegate, backend.clone());

    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    let report = orchestrator.wire(&request(), &sonic_endpoint(), &mut executor).await.unwrap();
    assert_eq!(report.proposal_count(), 2);

    let proposals = backend.proposals();
    assert_eq!(proposals.len(), 2);
    assert_eq!((proposals[0].safe, proposals[0].calls), (delegate, 4));
    assert_eq!((proposals[1].safe, proposals[1].calls), (owner, 2));

    let finalized: Vec<_> = report
        .finalized
        .iter()
        .map(|submission| match submission {
            Submission::Proposed { safe, calls, .. } => (*safe, *calls),
            other => panic!("unexpected submission {other:?}"),
        })
        .collect();
    assert_eq!(finalized, vec![(delegate, 4), (owner, 2)]);
}

#[tokio::test]
async fn library_mismatch_proposes_nothing() {
    let config = config();
    let backend = Arc::new(RecordingBackend::default());
    let safe = Address::repeat_byte(0x5a);
    let mut executor = safe_executor(safe, safe, backend.clone());
    let endpoint = Endpoint { receive: Address::repeat_byte(0xee), ..sonic_endpoint() };

    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    let err = orchestrator.wire(&request(), &endpoint, &mut executor).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PreconditionFailure);
    assert!(err.to_string().contains("while wiring to avalanche"));
    assert!(backend.proposals().is_empty());
    assert!(executor.queued().is_empty());
}

#[tokio::test]
async fn unknown_chain_is_rejected() {
    let config = config();
    let backend = Arc::new(RecordingBackend::default());
    let safe = Address::repeat_byte(0x5a);
    let mut executor = safe_executor(safe, safe, backend.clone());
    let request = WireRequest {
        chains: vec!["sonic".to_string(), "atlantis".to_string()],
        ..request()
    };

    let mut orchestrator = Orchestrator::from_config(&config).unwrap();
    let err = orchestrator.wire(&request, &sonic_endpoint(), &mut executor).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TopologyError);
    assert!(backend.proposals().is_empty());
}
