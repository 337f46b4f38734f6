//! secp256k1 private key.
//!
//! Wraps the k256 signing key and adds hex parsing, scalar tweaking for
//! hierarchical derivation, and recoverable signing.

use std::fmt;

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::{Field, PrimeField};
use k256::{FieldBytes, Scalar};
use zeroize::{Zeroize, Zeroizing};

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::util::decode_hex;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
pub const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key for signing and key derivation.
///
/// The scalar is always in `[1, n)`. The wrapped `SigningKey` wipes its
/// scalar when dropped.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Create a private key from raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the length is wrong or the scalar is zero or `>= n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_bytes(bytes.into()).map_err(|_| {
            PrimitivesError::InvalidPrivateKey("scalar is zero or not below the curve order".to_string())
        })?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// A leading `0x` is accepted.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex or the scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(decode_hex(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_BYTES_LEN] {
        let mut out = [0u8; PRIVATE_KEY_BYTES_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key for this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte prehashed message with RFC6979 deterministic nonces.
    ///
    /// The result is low-S normalized and carries the recovery id that
    /// matches the normalized `s`.
    ///
    /// # Arguments
    /// * `hash` - The 32-byte message digest.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign_recoverable(&self, hash: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        Signature::sign(hash, self)
    }

    /// Add a 32-byte scalar to this key modulo the curve order.
    ///
    /// This is the private half of a BIP32 child step: `k + tweak mod n`.
    ///
    /// # Arguments
    /// * `tweak` - Big-endian scalar; must be below the curve order.
    ///
    /// # Returns
    /// The tweaked key, or `InvalidPrivateKey` if the tweak is `>= n`
    /// or the sum is zero.
    pub fn add_scalar(&self, tweak: &[u8; 32]) -> Result<PrivateKey, PrimitivesError> {
        let tweak = scalar_from_canonical_bytes(tweak).ok_or_else(|| {
            PrimitivesError::InvalidPrivateKey("tweak is not below the curve order".to_string())
        })?;
        let sum = self.to_scalar() + tweak;
        if bool::from(sum.is_zero()) {
            return Err(PrimitivesError::InvalidPrivateKey(
                "tweaked key is zero".to_string(),
            ));
        }
        let mut bytes = [0u8; PRIVATE_KEY_BYTES_LEN];
        bytes.copy_from_slice(&sum.to_bytes());
        let child = PrivateKey::from_bytes(&bytes);
        bytes.zeroize();
        child
    }

    /// Access the underlying k256 `SigningKey`.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }

    /// Convert the private key to a k256 `Scalar` for arithmetic operations.
    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.as_nonzero_scalar().as_ref()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.pub_key().to_hex())
            .finish_non_exhaustive()
    }
}

/// Interpret 32 big-endian bytes as a scalar without reducing.
///
/// Returns `None` when the value is `>= n`.
pub(crate) fn scalar_from_canonical_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_repr(FieldBytes::from(*bytes)))
}
