//! Configuration transactions.

mod builder;
pub use builder::*;
mod options;
pub use options::OptionsBuilder;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    rpc::types::TransactionRequest,
};
use strum::Display;

/// Which part of the OApp a transaction configures.
///
/// Endpoint settings are made by the OApp delegate while peers and options are set by the owner,
/// so the category decides which identity has to authorize the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationCategory {
    /// A call to the endpoint.
    Endpoint,
    /// A call to the OApp itself.
    Peer,
}

/// A configuration call that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    /// The call target.
    pub to: Address,
    /// The calldata.
    pub data: Bytes,
    /// The native value, always zero for configuration calls.
    pub value: U256,
    /// Which identity authorizes the call.
    pub category: OperationCategory,
    /// Human readable name of the call, used in logs.
    pub label: String,
}

impl PendingTransaction {
    /// Creates a zero value transaction.
    pub fn new(
        to: Address,
        data: impl Into<Bytes>,
        category: OperationCategory,
        label: impl Into<String>,
    ) -> Self {
        Self { to, data: data.into(), value: U256::ZERO, category, label: label.into() }
    }

    /// Converts into a [`TransactionRequest`] for direct submission.
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_to(self.to)
            .with_input(self.data.clone())
            .with_value(self.value)
    }
}
