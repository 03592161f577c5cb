//! Safe transactions built from a batch of configuration calls.

use crate::{
    contracts::{IMultiSend, SafeTx},
    transactions::PendingTransaction,
};
use alloy::{
    primitives::{Address, B256, Bytes, ChainId, U256},
    sol_types::{Eip712Domain, SolCall, SolStruct, eip712_domain},
};
use strum::Display;

/// Safe operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    /// A regular call.
    Call = 0,
    /// A delegate call, used to route batches through `MultiSendCallOnly`.
    DelegateCall = 1,
}

/// Packs calls in the `MultiSend` encoding.
///
/// Each call is `operation (u8) | to (20 bytes) | value (u256) | data length (u256) | data`.
pub fn encode_multi_send(txs: &[PendingTransaction]) -> Bytes {
    let mut packed = Vec::new();
    for tx in txs {
        packed.push(Operation::Call as u8);
        packed.extend_from_slice(tx.to.as_slice());
        packed.extend_from_slice(&tx.value.to_be_bytes::<32>());
        packed.extend_from_slice(&U256::from(tx.data.len()).to_be_bytes::<32>());
        packed.extend_from_slice(&tx.data);
    }
    packed.into()
}

/// Builds the Safe transaction executing `txs` in order.
///
/// A single call is executed directly, anything more is a delegate call to `multi_send`. Gas
/// and refund fields are left zero, so the executor pays for gas.
pub fn build_safe_tx(txs: &[PendingTransaction], multi_send: Address, nonce: U256) -> SafeTx {
    let (to, value, data, operation) = match txs {
        [tx] => (tx.to, tx.value, tx.data.clone(), Operation::Call),
        _ => (
            multi_send,
            U256::ZERO,
            IMultiSend::multiSendCall { transactions: encode_multi_send(txs) }.abi_encode().into(),
            Operation::DelegateCall,
        ),
    };

    SafeTx {
        to,
        value,
        data,
        operation: operation as u8,
        safeTxGas: U256::ZERO,
        baseGas: U256::ZERO,
        gasPrice: U256::ZERO,
        gasToken: Address::ZERO,
        refundReceiver: Address::ZERO,
        nonce,
    }
}

/// The EIP-712 domain of a Safe.
pub fn safe_domain(chain_id: ChainId, safe: Address) -> Eip712Domain {
    eip712_domain! {
        chain_id: chain_id,
        verifying_contract: safe,
    }
}

/// The hash owners sign to approve `tx` on `safe`.
pub fn safe_tx_hash(tx: &SafeTx, chain_id: ChainId, safe: Address) -> B256 {
    tx.eip712_signing_hash(&safe_domain(chain_id, safe))
}
