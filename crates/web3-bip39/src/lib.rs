//! Mnemonic phrases, entropy and seed derivation.
//!
//! Provides the canonical English word list, CSPRNG-backed entropy,
//! phrase encoding/decoding with checksum validation, and the PBKDF2
//! stretch from phrase to 64-byte seed.

mod error;
pub use error::Bip39Error;

pub mod wordlist;
pub mod entropy;
pub mod mnemonic;
pub mod seed;

pub use entropy::{Entropy, VALID_STRENGTHS};
pub use mnemonic::{Mnemonic, VALID_WORD_COUNTS};
pub use seed::Seed;
pub use wordlist::WordList;
