//! Splitting of packed multi-send payloads.

use super::DecodeError;
use crate::types::InnerCall;
use alloy::primitives::{Address, U256};

/// Fixed size of a packed record header: `operation (1) | to (20) | value (32)
/// | dataLength (32)`.
const RECORD_HEADER_LEN: usize = 85;

/// Splits the packed `transactions` blob of a `multiSend` call into its inner
/// calls.
///
/// Records are concatenated without padding, each `operation: uint8 | to:
/// address | value: uint256 | dataLength: uint256` followed by `dataLength`
/// bytes of inner calldata. An empty blob yields an empty list. The operation
/// byte is read and discarded: the policy only admits batches on call-only
/// deployments, which reject delegatecalls on-chain.
pub fn split_multi_send(blob: &[u8]) -> Result<Vec<InnerCall>, DecodeError> {
    let mut calls = Vec::new();
    let mut cursor = 0;

    while cursor < blob.len() {
        if blob.len() - cursor < RECORD_HEADER_LEN {
            return Err(DecodeError::TruncatedHeader { offset: cursor });
        }

        let to = Address::from_slice(&blob[cursor + 1..cursor + 21]);
        let len = U256::from_be_slice(&blob[cursor + 53..cursor + 85]);
        let len = usize::try_from(len)
            .map_err(|_| DecodeError::DataOverrun { offset: cursor, len: usize::MAX })?;

        let start = cursor + RECORD_HEADER_LEN;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= blob.len())
            .ok_or(DecodeError::DataOverrun { offset: cursor, len })?;

        calls.push(InnerCall { to, data: blob[start..end].to_vec().into() });
        cursor = end;
    }

    Ok(calls)
}
