//! The 64-byte seed stretched from a mnemonic.

use std::fmt;

use web3_primitives::util::decode_hex;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::Bip39Error;

/// Length of a seed in bytes.
pub const SEED_LEN: usize = 64;

/// HD wallet root material. Has no structure beyond its 64 raw bytes.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub(crate) fn new(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }

    /// Wrap 64 seed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Bip39Error> {
        if bytes.len() != SEED_LEN {
            return Err(Bip39Error::InvalidSeedLength(bytes.len()));
        }
        let mut out = [0u8; SEED_LEN];
        out.copy_from_slice(bytes);
        Ok(Seed(out))
    }

    /// Parse a seed from hex (`0x` optional).
    pub fn from_hex(hex_str: &str) -> Result<Self, Bip39Error> {
        let bytes = Zeroizing::new(decode_hex(hex_str)?);
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Lowercase hex of the seed bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}
