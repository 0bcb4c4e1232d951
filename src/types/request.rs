//! Relay request and response types.

use alloy::primitives::{Address, Bytes, ChainId};
use serde::{Deserialize, Serialize};

/// A request to sponsor a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    /// Target chain id.
    pub chain_id: ChainId,
    /// The contract the sponsored transaction calls.
    pub to: Address,
    /// Raw calldata of the sponsored transaction.
    pub data: Bytes,
    /// Optional gas limit for the sponsored transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
}

/// Task handle returned by the sponsor service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayTask {
    /// Sponsor-side task identifier.
    pub task_id: String,
}

/// Remaining relay quota for a `(chain, address)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayLimit {
    /// Maximum number of sponsored relays per window.
    pub limit: u32,
    /// Relays left in the current window.
    pub remaining: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes};

    #[test]
    fn relay_request_deserializes_camel_case() {
        let request: RelayRequest = serde_json::from_str(
            r#"{
                "chainId": 5,
                "to": "0x40A2aCCbd92BCA938b02010E17A5b8929b49130D",
                "data": "0xdeadbeef",
                "gasLimit": 100000
            }"#,
        )
        .unwrap();

        assert_eq!(
            request,
            RelayRequest {
                chain_id: 5,
                to: address!("0x40A2aCCbd92BCA938b02010E17A5b8929b49130D"),
                data: bytes!("0xdeadbeef"),
                gas_limit: Some(100_000),
            }
        );
    }

    #[test]
    fn gas_limit_is_optional() {
        let request: RelayRequest = serde_json::from_str(
            r#"{"chainId": 100, "to": "0x40A2aCCbd92BCA938b02010E17A5b8929b49130D", "data": "0x"}"#,
        )
        .unwrap();
        assert_eq!(request.gas_limit, None);
    }

    #[test]
    fn relay_task_serializes_camel_case() {
        let json = serde_json::to_string(&RelayTask { task_id: "abc".into() }).unwrap();
        assert_eq!(json, r#"{"taskId":"abc"}"#);
    }
}
