//! Root entropy for a mnemonic.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use web3_primitives::util::decode_hex;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::Bip39Error;

/// Permitted entropy sizes in bits.
pub const VALID_STRENGTHS: [usize; 5] = [128, 160, 192, 224, 256];

/// Raw random bytes used as the root secret of a mnemonic.
///
/// The length is always one of `VALID_STRENGTHS / 8`. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    bytes: Vec<u8>,
}

impl Entropy {
    /// Draw fresh entropy from the operating system's CSPRNG.
    ///
    /// Each call uses its own `OsRng` handle, so no generator state is shared.
    ///
    /// # Arguments
    /// * `strength_bits` - One of 128, 160, 192, 224 or 256.
    ///
    /// # Returns
    /// `strength_bits / 8` random bytes, `InvalidStrength` for any other size,
    /// or `EntropyUnavailable` if the OS random source fails.
    pub fn generate(strength_bits: usize) -> Result<Self, Bip39Error> {
        if !VALID_STRENGTHS.contains(&strength_bits) {
            return Err(Bip39Error::InvalidStrength(strength_bits));
        }
        let mut bytes = vec![0u8; strength_bits / 8];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Bip39Error::EntropyUnavailable(e.to_string()))?;
        debug!(strength_bits, "generated entropy");
        Ok(Entropy { bytes })
    }

    /// Wrap existing entropy bytes.
    ///
    /// # Returns
    /// `InvalidEntropyLength` unless the length is 16, 20, 24, 28 or 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Bip39Error> {
        if !VALID_STRENGTHS.contains(&(bytes.len() * 8)) {
            return Err(Bip39Error::InvalidEntropyLength(bytes.len()));
        }
        Ok(Entropy {
            bytes: bytes.to_vec(),
        })
    }

    /// Parse entropy from hex (`0x` optional).
    pub fn from_hex(hex_str: &str) -> Result<Self, Bip39Error> {
        let bytes = Zeroizing::new(decode_hex(hex_str)?);
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex of the entropy bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Entropy size in bits.
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Checksum size in bits: one bit per 32 bits of entropy.
    pub fn checksum_bits(&self) -> usize {
        self.bits() / 32
    }

    /// Number of words this entropy encodes to.
    pub fn word_count(&self) -> usize {
        (self.bits() + self.checksum_bits()) / 11
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entropy")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}
