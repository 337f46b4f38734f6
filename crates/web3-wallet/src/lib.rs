/// Ethereum-style accounts for the web3 utils core.
///
/// A `Wallet` wraps one secp256k1 private key and exposes its public key,
/// its 20-byte Keccak address, and deterministic recoverable signatures.

mod error;
pub use error::WalletError;

pub mod address;
pub mod config;
pub mod message;
pub mod wallet;

pub use address::Address;
pub use config::WalletConfig;
pub use message::{hash_message, recover_address};
pub use wallet::Wallet;

pub use web3_primitives::ec::{RecoveryIdFormat, Signature};
