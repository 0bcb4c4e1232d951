//! Calldata recognition and decoding.
//!
//! Every supported transaction shape is declared as a [`sol!`] interface in
//! [`crate::types`]; this module provides the selector matching and ABI
//! decoding primitives the classifier and policy build on.
//!
//! [`sol!`]: alloy::sol

use alloy::{primitives::keccak256, sol_types::SolCall};
use thiserror::Error;

mod multisend;
pub use multisend::split_multi_send;

/// Errors produced when calldata does not match the expected ABI shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The data does not start with the expected function selector.
    #[error("calldata does not start with the expected selector")]
    SelectorMismatch,
    /// ABI decoding of the call parameters failed.
    #[error(transparent)]
    Abi(#[from] alloy::sol_types::Error),
    /// A multi-send record header extends past the end of the blob.
    #[error("multi-send record header truncated at offset {offset}")]
    TruncatedHeader {
        /// Byte offset of the record in the blob.
        offset: usize,
    },
    /// A multi-send record's data length overruns the blob.
    #[error("multi-send record data of {len} bytes overruns blob at offset {offset}")]
    DataOverrun {
        /// Byte offset of the record in the blob.
        offset: usize,
        /// Declared data length of the record.
        len: usize,
    },
}

/// Computes the 4-byte selector of a function signature string.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Returns true iff `data` begins with `selector`.
///
/// Data shorter than four bytes never matches.
pub fn matches_selector(data: &[u8], selector: [u8; 4]) -> bool {
    data.len() >= 4 && data[..4] == selector
}

/// Returns true iff `data` begins with the selector of call `C`.
pub fn is_call<C: SolCall>(data: &[u8]) -> bool {
    matches_selector(data, C::SELECTOR)
}

/// Decodes full calldata (selector included) into call `C`.
pub fn decode_call<C: SolCall>(data: &[u8]) -> Result<C, DecodeError> {
    if !is_call::<C>(data) {
        return Err(DecodeError::SelectorMismatch);
    }
    Ok(C::abi_decode(data)?)
}
