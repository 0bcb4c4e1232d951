//! Core relay types.

mod chain;
pub use chain::SupportedChain;

pub use alloy::primitives::ChainId;

mod contracts;
pub use contracts::{IERC20, IMultiSend, IProxyFactory, ISafe};

mod intent;
pub use intent::{InnerCall, RelayIntent};

mod request;
pub use request::{RelayLimit, RelayRequest, RelayTask};
