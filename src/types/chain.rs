//! Networks the relay sponsors transactions on.

use crate::error::RelayError;
use alloy::primitives::ChainId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A network with official Safe v1.3.0 deployments and a configured sponsor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ChainId", into = "ChainId")]
pub enum SupportedChain {
    /// Ethereum Goerli testnet.
    Goerli,
    /// Gnosis Chain.
    Gnosis,
}

impl SupportedChain {
    /// All supported networks.
    pub const ALL: [Self; 2] = [Self::Goerli, Self::Gnosis];

    /// The network's chain id.
    pub const fn chain_id(self) -> ChainId {
        match self {
            Self::Goerli => 5,
            Self::Gnosis => 100,
        }
    }
}

impl TryFrom<ChainId> for SupportedChain {
    type Error = RelayError;

    fn try_from(chain_id: ChainId) -> Result<Self, Self::Error> {
        match chain_id {
            5 => Ok(Self::Goerli),
            100 => Ok(Self::Gnosis),
            other => Err(RelayError::UnsupportedChain(other)),
        }
    }
}

impl From<SupportedChain> for ChainId {
    fn from(chain: SupportedChain) -> Self {
        chain.chain_id()
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Goerli => f.write_str("goerli"),
            Self::Gnosis => f.write_str("gnosis"),
        }
    }
}
