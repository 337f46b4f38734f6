//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 serialization, Hash160 identifiers,
//! point tweaking for public BIP32 derivation, and signature verification.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::ProjectivePoint;
use std::fmt;

use crate::ec::private_key::scalar_from_canonical_bytes;
use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::util::decode_hex;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
///
/// Wraps a k256 `VerifyingKey`; the point is always valid and never the identity.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::PointNotOnCurve)?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string (`0x` optional).
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = decode_hex(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the 32-byte X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    ///
    /// The first byte is 0x04, followed by 32-byte X and 32-byte Y coordinates.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The 64-byte `x || y` coordinates without the SEC1 `0x04` prefix.
    ///
    /// This is the input to Ethereum-style address hashing.
    pub fn to_raw_coordinates(&self) -> [u8; 64] {
        let uncompressed = self.to_uncompressed();
        let mut out = [0u8; 64];
        out.copy_from_slice(&uncompressed[1..]);
        out
    }

    /// Serialize the public key as a lowercase hexadecimal string (compressed format).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Compute the Hash160 of the compressed public key.
    ///
    /// Hash160 = RIPEMD160(SHA256(compressed_pubkey)).
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify a signature against a 32-byte message hash using this public key.
    pub fn verify(&self, hash: &[u8; 32], sig: &Signature) -> bool {
        sig.verify(hash, self)
    }

    /// Add `tweak * G` to this point.
    ///
    /// This is the public half of a non-hardened BIP32 child step.
    ///
    /// # Arguments
    /// * `tweak` - Big-endian scalar; must be below the curve order.
    ///
    /// # Returns
    /// The tweaked key, or `InvalidPublicKey` if the tweak is `>= n` or the
    /// result is the point at infinity.
    pub fn add_tweak(&self, tweak: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let scalar = scalar_from_canonical_bytes(tweak).ok_or_else(|| {
            PrimitivesError::InvalidPublicKey("tweak is not below the curve order".to_string())
        })?;
        let result_point = ProjectivePoint::GENERATOR * scalar + self.to_projective_point();
        if bool::from(result_point.is_identity()) {
            return Err(PrimitivesError::InvalidPublicKey(
                "tweaked point is at infinity".to_string(),
            ));
        }
        let encoded = result_point.to_affine().to_encoded_point(true);
        PublicKey::from_bytes(encoded.as_bytes())
    }

    /// Construct a PublicKey from a k256 `VerifyingKey`.
    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    /// Convert this public key to a k256 `ProjectivePoint` for EC arithmetic.
    pub(crate) fn to_projective_point(&self) -> ProjectivePoint {
        ProjectivePoint::from(*self.inner.as_affine())
    }

    /// Access the underlying k256 `VerifyingKey`.
    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::PrivateKey;

    const G_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                                  483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    fn scalar_key(last: u8) -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        PrivateKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_generator_encodings() {
        let g = scalar_key(1).pub_key();
        assert_eq!(g.to_hex(), G_COMPRESSED);
        assert_eq!(hex::encode(g.to_uncompressed()), G_UNCOMPRESSED);
        assert_eq!(hex::encode(g.to_raw_coordinates()), &G_UNCOMPRESSED[2..]);
    }

    #[test]
    fn test_pub_keys() {
        struct PubKeyTest {
            name: &'static str,
            key: &'static str,
            is_valid: bool,
        }

        let tests = [
            PubKeyTest {
                name: "uncompressed ok",
                key: "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5c\
                      b2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3",
                is_valid: true,
            },
            PubKeyTest {
                name: "uncompressed x changed",
                key: "0415db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5c\
                      b2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3",
                is_valid: false,
            },
            PubKeyTest {
                name: "compressed ok (ybit = 0)",
                key: "02ce0b14fb842b1ba549fdd675c98075f12e9c510f8ef52bd021a9a1f4809d3b4d",
                is_valid: true,
            },
            PubKeyTest {
                name: "compressed ok (ybit = 1)",
                key: "032689c7c2dab13309fb143e0e8fe396342521887e976690b6b47f5b2a4b7d448e",
                is_valid: true,
            },
            PubKeyTest {
                name: "wrong length",
                key: "05",
                is_valid: false,
            },
        ];

        for test in &tests {
            let result = PublicKey::from_hex(test.key);
            assert_eq!(
                result.is_ok(),
                test.is_valid,
                "{}: unexpected parse outcome {:?}",
                test.name,
                result.err()
            );
        }
    }

    #[test]
    fn test_compressed_round_trip() {
        let pk = PublicKey::from_hex(G_UNCOMPRESSED).unwrap();
        assert_eq!(hex::encode(pk.to_compressed()), G_COMPRESSED);
        assert_eq!(PublicKey::from_bytes(&pk.to_compressed()).unwrap(), pk);
    }

    #[test]
    fn test_add_tweak_matches_private_tweak() {
        let mut tweak = [0u8; 32];
        tweak[31] = 2;
        let via_public = scalar_key(1).pub_key().add_tweak(&tweak).unwrap();
        let via_private = scalar_key(1).add_scalar(&tweak).unwrap().pub_key();
        assert_eq!(via_public, via_private);
        assert_eq!(via_public, scalar_key(3).pub_key());
    }

    #[test]
    fn test_add_tweak_rejects_out_of_range() {
        let g = scalar_key(1).pub_key();
        assert!(g.add_tweak(&[0xff; 32]).is_err());
    }

    #[test]
    fn test_display() {
        let g = scalar_key(1).pub_key();
        assert_eq!(format!("{}", g), G_COMPRESSED);
    }
}
