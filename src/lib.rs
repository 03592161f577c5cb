//! # omniwire
//!
//! Library for wiring omnichain fungible tokens across LayerZero V2 chains.
//!
//! Chain configurations are derived from LayerZero metadata and a registry of deployed tokens.
//! A wiring run connects the chain the wallet is on to every other listed chain, either by
//! sending the configuration transactions directly or by proposing them to Safe multisigs.

pub mod chains;
pub mod cli;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod metadata;
pub mod orchestrator;
pub mod safe;
pub mod serde;
pub mod signers;
pub mod topology;
pub mod transactions;
pub mod validator;
