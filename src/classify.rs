//! Top-level calldata classification.

use crate::{
    calldata::{decode_call, is_call, split_multi_send},
    types::{IMultiSend, IProxyFactory, ISafe, RelayIntent},
};
use tracing::debug;

/// Classifies raw calldata into a [`RelayIntent`].
///
/// Pure function of the calldata: deployment and policy checks happen in
/// [`crate::policy::validate`]. Malformed parameters behind a recognized
/// selector classify as [`RelayIntent::Unrecognized`].
pub fn classify(data: &[u8]) -> RelayIntent {
    if is_call::<ISafe::execTransactionCall>(data) {
        return match decode_call::<ISafe::execTransactionCall>(data) {
            Ok(call) => RelayIntent::ExecTransaction(Box::new(call)),
            Err(err) => {
                debug!(%err, "malformed execTransaction calldata");
                RelayIntent::Unrecognized
            }
        };
    }

    if is_call::<IMultiSend::multiSendCall>(data) {
        return match decode_call::<IMultiSend::multiSendCall>(data)
            .and_then(|call| split_multi_send(&call.transactions))
        {
            Ok(calls) => RelayIntent::MultiSend { calls },
            Err(err) => {
                debug!(%err, "malformed multiSend calldata");
                RelayIntent::Unrecognized
            }
        };
    }

    if is_call::<IProxyFactory::createProxyWithNonceCall>(data) {
        return match decode_call::<IProxyFactory::createProxyWithNonceCall>(data) {
            Ok(call) => RelayIntent::CreateProxyWithNonce(call),
            Err(err) => {
                debug!(%err, "malformed createProxyWithNonce calldata");
                RelayIntent::Unrecognized
            }
        };
    }

    RelayIntent::Unrecognized
}
