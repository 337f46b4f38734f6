//! Personal-message hashing and signer recovery.

use web3_primitives::ec::Signature;
use web3_primitives::hash::keccak256;

use crate::address::Address;
use crate::error::WalletError;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Hash a message the way `personal_sign` does (EIP-191 version `0x45`).
///
/// # Arguments
/// * `message` - The raw message bytes.
///
/// # Returns
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`
/// where the length is written in decimal ASCII.
pub fn hash_message(message: impl AsRef<[u8]>) -> [u8; 32] {
    let message = message.as_ref();
    let length = message.len().to_string();
    let mut data = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + length.len() + message.len());
    data.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    data.extend_from_slice(length.as_bytes());
    data.extend_from_slice(message);
    keccak256(&data)
}

/// Recover the address that produced `signature` over `hash`.
pub fn recover_address(signature: &Signature, hash: &[u8; 32]) -> Result<Address, WalletError> {
    let public_key = signature.recover_public_key(hash)?;
    Ok(Address::from_public_key(&public_key))
}
