//! Deterministic CREATE2 prediction of Safe proxy addresses.

use alloy::primitives::{keccak256, Address, Keccak256, B256, U256};

/// Predicts the address of the Safe proxy a `createProxyWithNonce` call would
/// deploy.
///
/// Mirrors the factory's on-chain derivation:
///
/// ```text
/// salt         = keccak256(keccak256(initializer) || abi.encode(saltNonce))
/// initCodeHash = keccak256(creationCode || abi.encode(singleton))
/// address      = keccak256(0xff || factory || salt || initCodeHash)[12..]
/// ```
pub fn predict_safe_address(
    factory: Address,
    singleton: Address,
    initializer: &[u8],
    salt_nonce: U256,
    creation_code: &[u8],
) -> Address {
    let mut hasher = Keccak256::new();
    hasher.update(keccak256(initializer));
    hasher.update(salt_nonce.to_be_bytes::<32>());
    let salt = hasher.finalize();

    let mut hasher = Keccak256::new();
    hasher.update(creation_code);
    hasher.update(B256::left_padding_from(singleton.as_slice()));
    let init_code_hash = hasher.finalize();

    factory.create2(salt, init_code_hash)
}
