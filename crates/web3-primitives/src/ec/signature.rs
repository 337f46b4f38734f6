//! Recoverable ECDSA signature with RFC6979 deterministic nonces.
//!
//! Signatures are always produced in low-S form and serialize to the
//! fixed 65-byte `r || s || v` layout used by Ethereum-style wallets.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2), the upper bound of a low-S value.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// How the recovery id is encoded in the trailing `v` byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryIdFormat {
    /// `v` is the bare recovery id, 0 or 1.
    Raw,
    /// `v` is the recovery id plus 27, giving 27 or 28.
    #[default]
    Electrum,
}

impl RecoveryIdFormat {
    /// The constant added to the recovery id.
    pub fn offset(self) -> u8 {
        match self {
            RecoveryIdFormat::Raw => 0,
            RecoveryIdFormat::Electrum => 27,
        }
    }
}

/// An ECDSA signature with R and S components and its recovery id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian), always low-S.
    s: [u8; 32],
    /// Recovery id without any offset.
    recovery_id: u8,
}

impl Signature {
    /// Create a signature from raw components.
    ///
    /// # Arguments
    /// * `r` - The R component (32 bytes, big-endian).
    /// * `s` - The S component (32 bytes, big-endian).
    /// * `recovery_id` - Recovery id in `0..=3`, without offset.
    ///
    /// # Returns
    /// `Ok(Signature)`, or `InvalidSignature` if a component is zero, `>= n`,
    /// `s` is in the upper half of the order, or the recovery id is out of range.
    pub fn new(r: [u8; 32], s: [u8; 32], recovery_id: u8) -> Result<Self, PrimitivesError> {
        if is_zero(&r) || is_zero(&s) {
            return Err(PrimitivesError::InvalidSignature(
                "signature component is zero".to_string(),
            ));
        }
        if !is_less_than(&r, &CURVE_ORDER) || !is_less_than(&s, &CURVE_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature component is >= curve.N".to_string(),
            ));
        }
        if is_greater_than(&s, &HALF_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature S is not in low-S form".to_string(),
            ));
        }
        if recovery_id > 3 {
            return Err(PrimitivesError::InvalidSignature(format!(
                "invalid recovery id {}",
                recovery_id
            )));
        }
        Ok(Signature { r, s, recovery_id })
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// The recovery id without offset.
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// The `v` byte under the given encoding.
    pub fn v(&self, format: RecoveryIdFormat) -> u8 {
        self.recovery_id + format.offset()
    }

    /// Whether `s` lies in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        !is_greater_than(&self.s, &HALF_ORDER)
    }

    /// Serialize as `r (32) || s (32) || v (1)`.
    pub fn to_bytes(&self, format: RecoveryIdFormat) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v(format);
        out
    }

    /// Parse a 65-byte `r || s || v` signature.
    ///
    /// Both `v` conventions are accepted: `0..=3` and `27..=30`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "invalid signature size {}",
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        let v = bytes[64];
        let recovery_id = if v >= 27 { v - 27 } else { v };
        Signature::new(r, s, recovery_id)
    }

    /// Sign a 32-byte hash using RFC6979 deterministic nonces.
    ///
    /// k256 returns `s` already in the lower half of the order, with the
    /// recovery id matching that `s`.
    pub fn sign(hash: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let (k256_sig, recovery_id) = priv_key
            .signing_key()
            .sign_prehash_recoverable(hash)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        Ok(Signature {
            r,
            s,
            recovery_id: recovery_id.to_byte(),
        })
    }

    /// Verify this signature against a message hash and public key.
    pub fn verify(&self, hash: &[u8; 32], pub_key: &PublicKey) -> bool {
        let k256_sig = match self.to_k256() {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        pub_key
            .verifying_key()
            .verify_prehash(hash, &k256_sig)
            .is_ok()
    }

    /// Recover the signer's public key from this signature and the signed hash.
    pub fn recover_public_key(&self, hash: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let recovery_id = RecoveryId::from_byte(self.recovery_id)
            .ok_or_else(|| PrimitivesError::InvalidSignature("invalid recovery id".to_string()))?;
        let k256_sig = self.to_k256()?;
        let recovered = VerifyingKey::recover_from_prehash(hash, &k256_sig, recovery_id)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(PublicKey::from_k256_verifying_key(&recovered))
    }

    fn to_k256(&self) -> Result<ecdsa::Signature, PrimitivesError> {
        ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))
    }
}

/// Check if a 32-byte big-endian integer is zero.
fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Compare two 32-byte big-endian integers: a < b.
fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

/// Compare two 32-byte big-endian integers: a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}
