/// Web3 utils core - Cryptographic primitives.
///
/// This crate provides the building blocks the mnemonic, HD and wallet crates
/// are assembled from:
/// - Hash functions (SHA-256, SHA-512, RIPEMD-160, Keccak-256, HMAC, PBKDF2)
/// - Base58Check encoding for extended keys
/// - secp256k1 private keys, public keys and recoverable ECDSA signatures
/// - The error taxonomy shared by every crate in the workspace

pub mod hash;
pub mod base58;
pub mod ec;
pub mod util;

mod error;
pub use error::{ErrorKind, PrimitivesError};
