//! Official Safe v1.3.0 deployments on the supported networks.
//!
//! In-crate contract registry mirroring the canonical deployment addresses
//! published for Safe v1.3.0. The policy only admits transactions touching
//! these deployments, so the addresses are pinned at compile time rather than
//! fetched from a chain.

use crate::{constants::PROXY_CREATION_CODE, types::SupportedChain};
use alloy::primitives::{address, Address};

/// The pinned Safe contracts version.
pub const SAFE_VERSION: &str = "1.3.0";

/// The kinds of contracts the registry resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// The L1 Safe singleton.
    Singleton,
    /// The L2 Safe singleton.
    SingletonL2,
    /// The call-only multi-send library.
    MultiSendCallOnly,
    /// The Safe proxy factory.
    ProxyFactory,
}

const SINGLETON: Address = address!("0xd9Db270c1B5E3Bd161E8c8503c55cEABeE709552");
const SINGLETON_L2: Address = address!("0x3E5c63644E683549055b9Be8653de26E0B4CD36E");
const MULTI_SEND_CALL_ONLY: Address = address!("0x40A2aCCbd92BCA938b02010E17A5b8929b49130D");
const PROXY_FACTORY: Address = address!("0xa6B71E26C5e0845f74c812102Ca7114b6a896AB2");

/// Returns the official v1.3.0 deployment address of `kind` on `chain`.
///
/// Both supported networks use the canonical deployments, so the lookup only
/// branches on the contract kind.
pub const fn deployment(kind: ContractKind, chain: SupportedChain) -> Address {
    let _ = chain;
    match kind {
        ContractKind::Singleton => SINGLETON,
        ContractKind::SingletonL2 => SINGLETON_L2,
        ContractKind::MultiSendCallOnly => MULTI_SEND_CALL_ONLY,
        ContractKind::ProxyFactory => PROXY_FACTORY,
    }
}

/// Returns the proxy creation bytecode deployed on `chain`, if known.
///
/// `None` means the predictor cannot derive CREATE2 addresses for the
/// network.
pub const fn proxy_creation_code(chain: SupportedChain) -> Option<&'static [u8]> {
    match chain {
        SupportedChain::Goerli | SupportedChain::Gnosis => Some(PROXY_CREATION_CODE),
    }
}
