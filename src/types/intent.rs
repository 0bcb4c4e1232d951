//! Typed relay intents produced by classification.

use super::contracts::{IProxyFactory, ISafe};
use alloy::primitives::{Address, Bytes};

/// A classified relay request.
///
/// Exactly one variant is produced per request; classification is a pure
/// function of the calldata. Deployment and policy checks happen in
/// [`crate::policy`].
#[derive(Debug, Clone)]
pub enum RelayIntent {
    /// A direct `execTransaction` call on a Safe.
    ExecTransaction(Box<ISafe::execTransactionCall>),
    /// A `multiSend` batch, already split into its inner calls.
    MultiSend {
        /// The inner calls in batch order.
        calls: Vec<InnerCall>,
    },
    /// A `createProxyWithNonce` wallet deployment.
    CreateProxyWithNonce(IProxyFactory::createProxyWithNonceCall),
    /// Calldata that matches no supported transaction shape.
    Unrecognized,
}

/// One inner call of a `multiSend` batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerCall {
    /// Recipient of the inner call.
    pub to: Address,
    /// Calldata of the inner call.
    pub data: Bytes,
}
