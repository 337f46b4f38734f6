//! Hierarchical deterministic key derivation.
//!
//! Master keys are derived from a seed with HMAC-SHA512; children follow
//! hardened or normal steps along a [`DerivationPath`]. Every step returns a
//! new immutable [`ExtendedKey`].

mod error;
pub use error::HdError;

pub mod path;
pub mod extended_key;

pub use extended_key::{ExtendedKey, MASTER_KEY_DOMAIN};
pub use path::{ChildNumber, DerivationPath, HARDENED_OFFSET};
