/// Elliptic curve cryptography on secp256k1.
///
/// Provides private keys with scalar tweaking for BIP32, public keys with
/// point tweaking, and recoverable ECDSA signatures (RFC6979, low-S).

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::{RecoveryIdFormat, Signature, SIGNATURE_LEN};
