//! Mesh planning.
//!
//! Given the requested chains and the chain the signer is connected to, the planner decides which
//! chain is the source of this run and which chains it is wired to. Planning is pure: it never
//! touches the network and the same inputs always produce the same [`Plan`].

use crate::{
    chains::{ChainConfig, ChainConfigs},
    error::TopologyError,
};
use alloy::primitives::ChainId;
use itertools::Itertools;

/// The outcome of planning a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// The chain whose OApp is configured in this run.
    pub source: ChainConfig,
    /// The chains the source is wired to, in request order.
    pub destinations: Vec<ChainConfig>,
}

impl Plan {
    /// Chain keys of the destinations.
    pub fn destination_keys(&self) -> Vec<&str> {
        self.destinations.iter().map(|dest| dest.chain_key.as_str()).collect()
    }
}

/// Plans source and destinations of a run.
#[derive(Debug, Clone, Copy)]
pub struct TopologyPlanner<'a> {
    configs: &'a ChainConfigs,
}

impl<'a> TopologyPlanner<'a> {
    /// Creates a planner over the built chain configurations.
    pub fn new(configs: &'a ChainConfigs) -> Self {
        Self { configs }
    }

    /// Plans a run.
    ///
    /// `current_chain_id` is the chain id reported by the connected RPC. If `network` is given it
    /// names the expected source chain and must agree with `current_chain_id`.
    ///
    /// All requested chains are checked for a configuration and a token address before the
    /// source is determined.
    pub fn plan<S: AsRef<str>>(
        &self,
        chain_keys: &[S],
        current_chain_id: ChainId,
        network: Option<&str>,
    ) -> Result<Plan, TopologyError> {
        if chain_keys.is_empty() {
            return Err(TopologyError::EmptyChainList);
        }

        let requested = chain_keys
            .iter()
            .map(|key| {
                self.configs
                    .get(key.as_ref())
                    .ok_or_else(|| TopologyError::UnknownChain(key.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(missing) = requested.iter().find(|config| config.token.is_none()) {
            return Err(TopologyError::MissingTokenAddress(missing.chain_key.clone()));
        }

        let source = self.source(&requested, current_chain_id, network)?;
        if source.token.is_none() {
            return Err(TopologyError::MissingTokenAddress(source.chain_key.clone()));
        }

        let destinations = requested
            .into_iter()
            .filter(|config| config.chain_key != source.chain_key)
            .unique_by(|config| config.chain_key.clone())
            .cloned()
            .collect();

        Ok(Plan { source: source.clone(), destinations })
    }

    fn source(
        &self,
        requested: &[&'a ChainConfig],
        current_chain_id: ChainId,
        network: Option<&str>,
    ) -> Result<&'a ChainConfig, TopologyError> {
        let mismatch = |configured: Option<ChainId>| TopologyError::SourceChainMismatch {
            network: network.map(str::to_string),
            connected: current_chain_id,
            configured,
        };

        match network {
            Some(network) => {
                let config = self.configs.get(network).ok_or_else(|| mismatch(None))?;
                if config.native_chain_id != current_chain_id {
                    return Err(mismatch(Some(config.native_chain_id)));
                }
                Ok(config)
            }
            None => requested
                .iter()
                .copied()
                .find(|config| config.native_chain_id == current_chain_id)
                .or_else(|| self.configs.by_chain_id(current_chain_id))
                .ok_or_else(|| mismatch(None)),
        }
    }
}

/// Splits a comma separated chain list, trimming whitespace and dropping empty entries.
pub fn parse_chain_list(chains: &str) -> Vec<String> {
    chains.split(',').map(str::trim).filter(|key| !key.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn config(key: &str, chain_id: ChainId, eid: u32, token: bool) -> ChainConfig {
        ChainConfig {
            chain_key: key.to_string(),
            eid,
            native_chain_id: chain_id,
            endpoint: Address::repeat_byte(1),
            executor: Address::repeat_byte(2),
            send_library: Address::repeat_byte(3),
            receive_library: Address::repeat_byte(4),
            dvns: vec![Address::repeat_byte(5), Address::repeat_byte(6)],
            token: token.then(|| Address::repeat_byte(eid as u8)),
            confirmations: token.then_some(20),
            is_mainnet: true,
        }
    }

    fn configs() -> ChainConfigs {
        ChainConfigs::from_iter([
            config("sonic", 146, 30332, true),
            config("avalanche", 43114, 30106, true),
            config("base", 8453, 30184, true),
            config("unichain", 130, 30320, false),
        ])
    }

    #[test]
    fn sonic_to_avalanche() {
        let configs = configs();
        let plan = TopologyPlanner::new(&configs)
            .plan(&["sonic", "avalanche"], 146, Some("sonic"))
            .unwrap();

        assert_eq!(plan.source.chain_key, "sonic");
        assert_eq!(plan.destination_keys(), vec!["avalanche"]);
    }

    #[test]
    fn destinations_keep_order_and_drop_duplicates() {
        let configs = configs();
        let planner = TopologyPlanner::new(&configs);
        let plan = planner.plan(&["base", "sonic", "avalanche", "base"], 146, None).unwrap();

        assert_eq!(plan.source.chain_key, "sonic");
        assert_eq!(plan.destination_keys(), vec!["base", "avalanche"]);

        // idempotent
        let again = planner.plan(&["base", "sonic", "avalanche", "base"], 146, None).unwrap();
        assert_eq!(plan, again);
    }

    #[test]
    fn source_outside_requested_chains() {
        let configs = configs();
        let plan =
            TopologyPlanner::new(&configs).plan(&["avalanche", "base"], 146, None).unwrap();
        assert_eq!(plan.source.chain_key, "sonic");
        assert_eq!(plan.destination_keys(), vec!["avalanche", "base"]);
    }

    #[test]
    fn unknown_chain() {
        let configs = configs();
        let err =
            TopologyPlanner::new(&configs).plan(&["sonic", "nowhere"], 146, None).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownChain(key) if key == "nowhere"));
    }

    #[test]
    fn missing_token_address() {
        let configs = configs();
        let err =
            TopologyPlanner::new(&configs).plan(&["sonic", "unichain"], 146, None).unwrap_err();
        assert!(matches!(err, TopologyError::MissingTokenAddress(key) if key == "unichain"));

        // checked before the source is determined
        let err =
            TopologyPlanner::new(&configs).plan(&["sonic", "unichain"], 1, None).unwrap_err();
        assert!(matches!(err, TopologyError::MissingTokenAddress(_)));
    }

    #[test]
    fn source_mismatch() {
        let configs = configs();
        let planner = TopologyPlanner::new(&configs);

        let err = planner.plan(&["sonic", "avalanche"], 43114, Some("sonic")).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::SourceChainMismatch { connected: 43114, configured: Some(146), .. }
        ));

        let err = planner.plan(&["sonic", "avalanche"], 1, None).unwrap_err();
        assert!(matches!(err, TopologyError::SourceChainMismatch { configured: None, .. }));

        let err = planner.plan(&["sonic"], 146, Some("nowhere")).unwrap_err();
        assert!(matches!(err, TopologyError::SourceChainMismatch { configured: None, .. }));
    }

    #[test]
    fn source_without_token() {
        let configs = configs();
        let err = TopologyPlanner::new(&configs).plan(&["sonic"], 130, None).unwrap_err();
        assert!(matches!(err, TopologyError::MissingTokenAddress(key) if key == "unichain"));
    }

    #[test]
    fn empty_chain_list() {
        let configs = configs();
        let chains: [&str; 0] = [];
        assert!(matches!(
            TopologyPlanner::new(&configs).plan(&chains, 146, None),
            Err(TopologyError::EmptyChainList)
        ));
    }

    #[test]
    fn chain_list() {
        assert_eq!(
            parse_chain_list(" sonic, avalanche,,base "),
            vec!["sonic", "avalanche", "base"]
        );
        assert!(parse_chain_list(" , ").is_empty());
    }
}
