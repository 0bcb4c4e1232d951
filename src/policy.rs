//! Sponsorship policy over classified relay intents.
//!
//! The validator is the second stage of the admission pipeline: it consumes a
//! [`RelayIntent`] and decides whether the relay may sponsor it, producing the
//! set of addresses whose quota the request consumes. It is pure: deployment
//! addresses come from the in-crate registry and the outcome depends only on
//! `(chain, to, intent)`. Confirming that a Safe is actually deployed is left
//! to the caller via [`Acceptance::verify_safe`], since creation flows have no
//! deployed Safe yet.

use crate::{
    calldata::{decode_call, is_call, matches_selector},
    deployments::{deployment, proxy_creation_code, ContractKind},
    predict::predict_safe_address,
    types::{InnerCall, RelayIntent, SupportedChain, IERC20, ISafe},
};
use alloy::{primitives::Address, sol_types::SolCall};
use thiserror::Error;

/// Selectors of every external function of the pinned v1.3.0 Safe singleton.
///
/// A self-call is only sponsored if its selector appears here; anything the
/// pinned ABI does not know is rejected rather than silently allowed.
const SAFE_SINGLETON_SELECTORS: &[[u8; 4]] = &[
    ISafe::setupCall::SELECTOR,
    ISafe::execTransactionCall::SELECTOR,
    ISafe::requiredTxGasCall::SELECTOR,
    ISafe::approveHashCall::SELECTOR,
    ISafe::checkSignaturesCall::SELECTOR,
    ISafe::checkNSignaturesCall::SELECTOR,
    ISafe::domainSeparatorCall::SELECTOR,
    ISafe::encodeTransactionDataCall::SELECTOR,
    ISafe::getTransactionHashCall::SELECTOR,
    ISafe::getChainIdCall::SELECTOR,
    ISafe::nonceCall::SELECTOR,
    ISafe::signedMessagesCall::SELECTOR,
    ISafe::approvedHashesCall::SELECTOR,
    ISafe::VERSIONCall::SELECTOR,
    ISafe::enableModuleCall::SELECTOR,
    ISafe::disableModuleCall::SELECTOR,
    ISafe::execTransactionFromModuleCall::SELECTOR,
    ISafe::execTransactionFromModuleReturnDataCall::SELECTOR,
    ISafe::isModuleEnabledCall::SELECTOR,
    ISafe::getModulesPaginatedCall::SELECTOR,
    ISafe::addOwnerWithThresholdCall::SELECTOR,
    ISafe::removeOwnerCall::SELECTOR,
    ISafe::swapOwnerCall::SELECTOR,
    ISafe::changeThresholdCall::SELECTOR,
    ISafe::getThresholdCall::SELECTOR,
    ISafe::isOwnerCall::SELECTOR,
    ISafe::getOwnersCall::SELECTOR,
    ISafe::setFallbackHandlerCall::SELECTOR,
    ISafe::setGuardCall::SELECTOR,
    ISafe::getStorageAtCall::SELECTOR,
    ISafe::simulateAndRevertCall::SELECTOR,
];

/// Returns true iff `data` calls a function of the pinned Safe singleton ABI.
pub fn is_safe_management_call(data: &[u8]) -> bool {
    SAFE_SINGLETON_SELECTORS.iter().any(|selector| matches_selector(data, *selector))
}

/// The outcome of validating a classified intent.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// The intent may be relayed.
    Accepted(Acceptance),
    /// The intent must not be relayed.
    Rejected(RejectionReason),
}

/// Details of an accepted intent.
#[derive(Debug, Clone)]
pub struct Acceptance {
    /// Addresses whose relay quota the request consumes.
    ///
    /// The Safe address for executions and batches, every prospective owner
    /// for wallet creations. Never empty.
    pub limit_addresses: Vec<Address>,
    /// Safe whose deployment must be confirmed with the Safe-Info oracle
    /// before relaying.
    ///
    /// Set when a self-call or cancellation was admitted: those are only
    /// meaningful on a deployed Safe, which the pure validator cannot check
    /// itself.
    pub verify_safe: Option<Address>,
    /// The CREATE2-predicted Safe address for wallet creations.
    pub predicted_safe: Option<Address>,
}

/// Why an intent was not admitted.
///
/// The variants distinguish malformed or unsupported calldata from calldata
/// that was recognized but is disallowed by policy; clients see both as the
/// same error code, the reason string is for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// No supported transaction shape was recognized.
    #[error("unsupported or malformed calldata")]
    UnrecognizedCalldata,
    /// Parameters behind a recognized selector did not decode.
    #[error("malformed {0} calldata")]
    MalformedCalldata(&'static str),
    /// An ERC-20 transfer sending tokens back to the Safe itself.
    #[error("ERC-20 transfer recipient is the Safe itself")]
    SelfTransfer,
    /// A Safe calling itself with attached value.
    #[error("self-call with non-zero value")]
    SelfCallWithValue,
    /// A self-call whose selector the pinned Safe ABI does not know.
    #[error("self-call selector is not a Safe management function")]
    UnknownSelfCallSelector,
    /// `multiSend` sent to something other than the official call-only
    /// deployment.
    #[error("multiSend target is not the official MultiSendCallOnly deployment")]
    UnofficialMultiSend,
    /// A `multiSend` batch with no inner calls.
    #[error("multiSend batch is empty")]
    EmptyMultiSend,
    /// A `multiSend` inner call that is not an `execTransaction`.
    #[error("multiSend inner call is not execTransaction")]
    InnerNotExecTransaction,
    /// `multiSend` inner calls targeting more than one Safe.
    #[error("multiSend inner calls do not share a single Safe")]
    MixedRecipients,
    /// `createProxyWithNonce` sent to something other than the official
    /// factory.
    #[error("createProxyWithNonce target is not the official proxy factory")]
    UnofficialProxyFactory,
    /// A creation pointing at a singleton that is not an official deployment.
    #[error("singleton is not an official Safe deployment")]
    UnofficialSingleton,
    /// No proxy creation bytecode is registered for the network.
    #[error("no proxy creation code known for this network")]
    UnsupportedDeployment,
    /// A `setup` initializer without owners.
    #[error("setup initializer has no owners")]
    NoOwners,
    /// The Safe-Info oracle could not confirm the target is a deployed Safe.
    #[error("{0} is not a deployed Safe")]
    NotASafe(Address),
}

/// Validates a classified intent against the sponsorship policy.
pub fn validate(chain: SupportedChain, to: Address, intent: &RelayIntent) -> ValidationOutcome {
    match intent {
        RelayIntent::ExecTransaction(call) => validate_exec(to, call),
        RelayIntent::MultiSend { calls } => validate_multi_send(chain, to, calls),
        RelayIntent::CreateProxyWithNonce(call) => validate_create_proxy(chain, to, call),
        RelayIntent::Unrecognized => {
            ValidationOutcome::Rejected(RejectionReason::UnrecognizedCalldata)
        }
    }
}

/// How an admissible `execTransaction` relates to its Safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecKind {
    /// The Safe transacts with another party.
    ThirdParty,
    /// The Safe manages itself: a cancellation or a call from the pinned
    /// singleton ABI.
    SelfManagement,
}

/// The `execTransaction` admission rule, shared between direct executions and
/// `multiSend` inner calls.
fn check_exec_call(
    safe: Address,
    call: &ISafe::execTransactionCall,
) -> Result<ExecKind, RejectionReason> {
    // An ERC-20 transfer back to the Safe is a self-transfer disguised as a
    // third-party call. A non-Safe recipient does not admit the call on its
    // own; the self-target checks below still apply.
    if is_call::<IERC20::transferCall>(&call.data) {
        let transfer = decode_call::<IERC20::transferCall>(&call.data)
            .map_err(|_| RejectionReason::MalformedCalldata("transfer"))?;
        if transfer.to == safe {
            return Err(RejectionReason::SelfTransfer);
        }
    }

    if call.to != safe {
        return Ok(ExecKind::ThirdParty);
    }

    if !call.value.is_zero() {
        return Err(RejectionReason::SelfCallWithValue);
    }

    // Empty data is a cancellation, everything else must be a management call
    // from the pinned singleton ABI.
    if call.data.is_empty() || is_safe_management_call(&call.data) {
        Ok(ExecKind::SelfManagement)
    } else {
        Err(RejectionReason::UnknownSelfCallSelector)
    }
}

fn validate_exec(safe: Address, call: &ISafe::execTransactionCall) -> ValidationOutcome {
    match check_exec_call(safe, call) {
        Ok(kind) => ValidationOutcome::Accepted(Acceptance {
            limit_addresses: vec![safe],
            verify_safe: (kind == ExecKind::SelfManagement).then_some(safe),
            predicted_safe: None,
        }),
        Err(reason) => ValidationOutcome::Rejected(reason),
    }
}

fn validate_multi_send(
    chain: SupportedChain,
    to: Address,
    calls: &[InnerCall],
) -> ValidationOutcome {
    if to != deployment(ContractKind::MultiSendCallOnly, chain) {
        return ValidationOutcome::Rejected(RejectionReason::UnofficialMultiSend);
    }

    let Some(first) = calls.first() else {
        return ValidationOutcome::Rejected(RejectionReason::EmptyMultiSend);
    };

    let safe = first.to;
    let mut verify_safe = None;
    for call in calls {
        if !is_call::<ISafe::execTransactionCall>(&call.data) {
            return ValidationOutcome::Rejected(RejectionReason::InnerNotExecTransaction);
        }
        let exec = match decode_call::<ISafe::execTransactionCall>(&call.data) {
            Ok(exec) => exec,
            Err(_) => {
                return ValidationOutcome::Rejected(RejectionReason::MalformedCalldata(
                    "execTransaction",
                ))
            }
        };
        match check_exec_call(call.to, &exec) {
            Ok(ExecKind::SelfManagement) => verify_safe = Some(call.to),
            Ok(ExecKind::ThirdParty) => {}
            Err(reason) => return ValidationOutcome::Rejected(reason),
        }
        if call.to != safe {
            return ValidationOutcome::Rejected(RejectionReason::MixedRecipients);
        }
    }

    ValidationOutcome::Accepted(Acceptance {
        limit_addresses: vec![safe],
        verify_safe,
        predicted_safe: None,
    })
}

fn validate_create_proxy(
    chain: SupportedChain,
    to: Address,
    call: &crate::types::IProxyFactory::createProxyWithNonceCall,
) -> ValidationOutcome {
    if to != deployment(ContractKind::ProxyFactory, chain) {
        return ValidationOutcome::Rejected(RejectionReason::UnofficialProxyFactory);
    }

    let is_official_singleton = call._singleton == deployment(ContractKind::Singleton, chain)
        || call._singleton == deployment(ContractKind::SingletonL2, chain);
    if !is_official_singleton {
        return ValidationOutcome::Rejected(RejectionReason::UnofficialSingleton);
    }

    let Some(creation_code) = proxy_creation_code(chain) else {
        return ValidationOutcome::Rejected(RejectionReason::UnsupportedDeployment);
    };
    let predicted =
        predict_safe_address(to, call._singleton, &call.initializer, call.saltNonce, creation_code);

    // The initializer is a full `setup` call; its owners carry the quota.
    let setup = match decode_call::<ISafe::setupCall>(&call.initializer) {
        Ok(setup) => setup,
        Err(_) => return ValidationOutcome::Rejected(RejectionReason::MalformedCalldata("setup")),
    };
    if setup._owners.is_empty() {
        return ValidationOutcome::Rejected(RejectionReason::NoOwners);
    }

    ValidationOutcome::Accepted(Acceptance {
        limit_addresses: setup._owners,
        verify_safe: None,
        predicted_safe: Some(predicted),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IProxyFactory;
    use alloy::primitives::{Bytes, U256};

    const CHAIN: SupportedChain = SupportedChain::Goerli;

    fn safe() -> Address {
        Address::repeat_byte(0x5a)
    }

    fn exec_call(to: Address, value: U256, data: Bytes) -> ISafe::execTransactionCall {
        ISafe::execTransactionCall {
            to,
            value,
            data,
            operation: 0,
            safeTxGas: U256::ZERO,
            baseGas: U256::ZERO,
            gasPrice: U256::ZERO,
            gasToken: Address::ZERO,
            refundReceiver: Address::ZERO,
            signatures: Bytes::new(),
        }
    }

    fn exec_intent(to: Address, value: U256, data: Bytes) -> RelayIntent {
        RelayIntent::ExecTransaction(Box::new(exec_call(to, value, data)))
    }

    fn accepted(outcome: ValidationOutcome) -> Acceptance {
        match outcome {
            ValidationOutcome::Accepted(acceptance) => acceptance,
            ValidationOutcome::Rejected(reason) => panic!("rejected: {reason}"),
        }
    }

    fn rejected(outcome: ValidationOutcome) -> RejectionReason {
        match outcome {
            ValidationOutcome::Rejected(reason) => reason,
            ValidationOutcome::Accepted(_) => panic!("accepted"),
        }
    }

    #[test]
    fn third_party_exec_is_accepted() {
        let intent = exec_intent(Address::repeat_byte(0x11), U256::from(10), Bytes::new());
        let acceptance = accepted(validate(CHAIN, safe(), &intent));
        assert_eq!(acceptance.limit_addresses, vec![safe()]);
        assert_eq!(acceptance.verify_safe, None);
    }

    #[test]
    fn erc20_transfer_to_third_party_is_accepted() {
        let transfer = IERC20::transferCall { to: Address::repeat_byte(0x11), amount: U256::from(5) };
        let intent =
            exec_intent(Address::repeat_byte(0x70), U256::ZERO, transfer.abi_encode().into());
        assert_eq!(accepted(validate(CHAIN, safe(), &intent)).limit_addresses, vec![safe()]);
    }

    #[test]
    fn erc20_self_transfer_is_rejected() {
        let transfer = IERC20::transferCall { to: safe(), amount: U256::from(5) };
        let intent =
            exec_intent(Address::repeat_byte(0x70), U256::ZERO, transfer.abi_encode().into());
        assert_eq!(rejected(validate(CHAIN, safe(), &intent)), RejectionReason::SelfTransfer);
    }

    #[test]
    fn self_call_with_value_is_rejected() {
        let intent = exec_intent(safe(), U256::from(1), Bytes::new());
        assert_eq!(rejected(validate(CHAIN, safe(), &intent)), RejectionReason::SelfCallWithValue);
    }

    #[test]
    fn self_call_with_value_is_rejected_even_with_transfer_data() {
        let transfer = IERC20::transferCall { to: Address::repeat_byte(0x11), amount: U256::from(5) };
        let intent = exec_intent(safe(), U256::from(1), transfer.abi_encode().into());
        assert_eq!(rejected(validate(CHAIN, safe(), &intent)), RejectionReason::SelfCallWithValue);
    }

    #[test]
    fn self_call_with_transfer_data_is_not_safe_management() {
        let transfer = IERC20::transferCall { to: Address::repeat_byte(0x11), amount: U256::from(5) };
        let intent = exec_intent(safe(), U256::ZERO, transfer.abi_encode().into());
        assert_eq!(
            rejected(validate(CHAIN, safe(), &intent)),
            RejectionReason::UnknownSelfCallSelector
        );
    }

    #[test]
    fn cancellation_is_accepted_pending_safe_check() {
        let intent = exec_intent(safe(), U256::ZERO, Bytes::new());
        let acceptance = accepted(validate(CHAIN, safe(), &intent));
        assert_eq!(acceptance.limit_addresses, vec![safe()]);
        assert_eq!(acceptance.verify_safe, Some(safe()));
    }

    #[test]
    fn owner_management_self_call_is_accepted() {
        let manage = ISafe::addOwnerWithThresholdCall {
            owner: Address::repeat_byte(0x11),
            _threshold: U256::from(2),
        };
        let intent = exec_intent(safe(), U256::ZERO, manage.abi_encode().into());
        let acceptance = accepted(validate(CHAIN, safe(), &intent));
        assert_eq!(acceptance.verify_safe, Some(safe()));
    }

    #[test]
    fn unknown_self_call_selector_is_rejected() {
        let intent = exec_intent(safe(), U256::ZERO, vec![0xde, 0xad, 0xbe, 0xef].into());
        assert_eq!(
            rejected(validate(CHAIN, safe(), &intent)),
            RejectionReason::UnknownSelfCallSelector
        );
    }

    #[test]
    fn unrecognized_is_always_rejected() {
        assert_eq!(
            rejected(validate(CHAIN, safe(), &RelayIntent::Unrecognized)),
            RejectionReason::UnrecognizedCalldata
        );
    }

    /// An inner `execTransaction` record against `safe`, sending `value` to a
    /// third party.
    fn inner_exec(safe: Address, value: U256, data: Bytes) -> InnerCall {
        let exec = exec_call(Address::repeat_byte(0x70), value, data);
        InnerCall { to: safe, data: exec.abi_encode().into() }
    }

    fn multi_send_target() -> Address {
        deployment(ContractKind::MultiSendCallOnly, CHAIN)
    }

    #[test]
    fn multi_send_sharing_one_safe_is_accepted() {
        let intent = RelayIntent::MultiSend {
            calls: vec![
                inner_exec(safe(), U256::from(1), Bytes::new()),
                inner_exec(safe(), U256::from(2), Bytes::new()),
            ],
        };
        let acceptance = accepted(validate(CHAIN, multi_send_target(), &intent));
        assert_eq!(acceptance.limit_addresses, vec![safe()]);
        assert_eq!(acceptance.verify_safe, None);
    }

    #[test]
    fn multi_send_to_unofficial_deployment_is_rejected() {
        let intent =
            RelayIntent::MultiSend { calls: vec![inner_exec(safe(), U256::from(1), Bytes::new())] };
        assert_eq!(
            rejected(validate(CHAIN, Address::repeat_byte(0x99), &intent)),
            RejectionReason::UnofficialMultiSend
        );
    }

    #[test]
    fn empty_multi_send_is_rejected() {
        let intent = RelayIntent::MultiSend { calls: vec![] };
        assert_eq!(
            rejected(validate(CHAIN, multi_send_target(), &intent)),
            RejectionReason::EmptyMultiSend
        );
    }

    #[test]
    fn multi_send_with_mixed_recipients_is_rejected() {
        let intent = RelayIntent::MultiSend {
            calls: vec![
                inner_exec(safe(), U256::from(1), Bytes::new()),
                inner_exec(Address::repeat_byte(0x11), U256::from(1), Bytes::new()),
            ],
        };
        assert_eq!(
            rejected(validate(CHAIN, multi_send_target(), &intent)),
            RejectionReason::MixedRecipients
        );
    }

    #[test]
    fn multi_send_with_non_exec_inner_call_is_rejected() {
        let intent = RelayIntent::MultiSend {
            calls: vec![InnerCall { to: safe(), data: vec![0xde, 0xad, 0xbe, 0xef].into() }],
        };
        assert_eq!(
            rejected(validate(CHAIN, multi_send_target(), &intent)),
            RejectionReason::InnerNotExecTransaction
        );
    }

    #[test]
    fn multi_send_with_failing_inner_call_is_rejected() {
        // Second inner call is a self-call carrying value.
        let intent = RelayIntent::MultiSend {
            calls: vec![
                inner_exec(safe(), U256::from(1), Bytes::new()),
                InnerCall {
                    to: safe(),
                    data: exec_call(safe(), U256::from(1), Bytes::new()).abi_encode().into(),
                },
            ],
        };
        assert_eq!(
            rejected(validate(CHAIN, multi_send_target(), &intent)),
            RejectionReason::SelfCallWithValue
        );
    }

    #[test]
    fn multi_send_with_self_management_inner_call_requires_safe_check() {
        let intent = RelayIntent::MultiSend {
            calls: vec![
                inner_exec(safe(), U256::from(1), Bytes::new()),
                InnerCall {
                    to: safe(),
                    data: exec_call(safe(), U256::ZERO, Bytes::new()).abi_encode().into(),
                },
            ],
        };
        let acceptance = accepted(validate(CHAIN, multi_send_target(), &intent));
        assert_eq!(acceptance.verify_safe, Some(safe()));
    }

    fn setup_initializer(owners: Vec<Address>) -> Bytes {
        ISafe::setupCall {
            _owners: owners,
            _threshold: U256::from(1),
            to: Address::ZERO,
            data: Bytes::new(),
            fallbackHandler: Address::ZERO,
            paymentToken: Address::ZERO,
            payment: U256::ZERO,
            paymentReceiver: Address::ZERO,
        }
        .abi_encode()
        .into()
    }

    fn create_proxy_intent(singleton: Address, owners: Vec<Address>) -> RelayIntent {
        RelayIntent::CreateProxyWithNonce(IProxyFactory::createProxyWithNonceCall {
            _singleton: singleton,
            initializer: setup_initializer(owners),
            saltNonce: U256::from(7),
        })
    }

    fn factory() -> Address {
        deployment(ContractKind::ProxyFactory, CHAIN)
    }

    #[test]
    fn creation_with_official_l1_singleton_is_accepted() {
        let owners = vec![Address::repeat_byte(0x01), Address::repeat_byte(0x02)];
        let intent = create_proxy_intent(deployment(ContractKind::Singleton, CHAIN), owners.clone());
        let acceptance = accepted(validate(CHAIN, factory(), &intent));
        assert_eq!(acceptance.limit_addresses, owners);
        assert!(acceptance.predicted_safe.is_some());
        assert_eq!(acceptance.verify_safe, None);
    }

    #[test]
    fn creation_with_official_l2_singleton_is_accepted() {
        let intent = create_proxy_intent(
            deployment(ContractKind::SingletonL2, CHAIN),
            vec![Address::repeat_byte(0x01)],
        );
        assert!(matches!(validate(CHAIN, factory(), &intent), ValidationOutcome::Accepted(_)));
    }

    #[test]
    fn creation_through_unofficial_factory_is_rejected() {
        let intent = create_proxy_intent(
            deployment(ContractKind::Singleton, CHAIN),
            vec![Address::repeat_byte(0x01)],
        );
        assert_eq!(
            rejected(validate(CHAIN, Address::repeat_byte(0x99), &intent)),
            RejectionReason::UnofficialProxyFactory
        );
    }

    #[test]
    fn creation_with_unofficial_singleton_is_rejected() {
        let intent =
            create_proxy_intent(Address::repeat_byte(0x99), vec![Address::repeat_byte(0x01)]);
        assert_eq!(
            rejected(validate(CHAIN, factory(), &intent)),
            RejectionReason::UnofficialSingleton
        );
    }

    #[test]
    fn creation_with_malformed_initializer_is_rejected() {
        let intent = RelayIntent::CreateProxyWithNonce(IProxyFactory::createProxyWithNonceCall {
            _singleton: deployment(ContractKind::Singleton, CHAIN),
            initializer: vec![0xde, 0xad].into(),
            saltNonce: U256::ZERO,
        });
        assert_eq!(
            rejected(validate(CHAIN, factory(), &intent)),
            RejectionReason::MalformedCalldata("setup")
        );
    }

    #[test]
    fn creation_without_owners_is_rejected() {
        let intent = create_proxy_intent(deployment(ContractKind::Singleton, CHAIN), vec![]);
        assert_eq!(rejected(validate(CHAIN, factory(), &intent)), RejectionReason::NoOwners);
    }

    #[test]
    fn management_selectors_come_from_the_pinned_abi() {
        assert!(is_safe_management_call(
            &ISafe::setGuardCall { guard: Address::ZERO }.abi_encode()
        ));
        assert!(is_safe_management_call(
            &ISafe::changeThresholdCall { _threshold: U256::from(1) }.abi_encode()
        ));
        assert!(!is_safe_management_call(&[0xde, 0xad, 0xbe, 0xef]));
        assert!(!is_safe_management_call(&[]));
    }
}
