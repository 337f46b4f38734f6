#![deny(missing_docs)]

//! Web3 utils core.
//!
//! Re-exports the mnemonic, HD key and wallet crates for single-crate usage,
//! and offers a hex-in / hex-out call surface in [`api`] for bindings.

pub use web3_bip39 as bip39;
pub use web3_hd as hd;
pub use web3_primitives as primitives;
pub use web3_wallet as wallet;

pub mod api;
mod config;
mod error;

pub use config::Config;
pub use error::Web3Error;
pub use web3_primitives::ErrorKind;
