//! Extended keys: a key plus chain code, with BIP32 child derivation.
//!
//! Master: `I = HMAC-SHA512(key = domain, data = seed)`, `I_L` is the private
//! key and `I_R` the chain code.
//!
//! Child step from `(k_par, c_par)`:
//! - hardened: `data = 0x00 || ser256(k_par) || ser32(index + 2^31)`
//! - normal:   `data = serP(K_par) || ser32(index)`
//!
//! `I = HMAC-SHA512(c_par, data)`, `k_i = I_L + k_par mod n`, `c_i = I_R`.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};
use web3_primitives::base58;
use web3_primitives::ec::{PrivateKey, PublicKey};
use web3_primitives::hash::sha512_hmac;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::HdError;
use crate::path::{ChildNumber, DerivationPath};

/// HMAC key used to derive the master key from a seed.
pub const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// Length of a serialized extended key before the Base58Check checksum.
const SERIALIZED_LEN: usize = 78;

/// Mainnet version bytes for serialized private extended keys (`xprv`).
const VERSION_XPRV: [u8; 4] = [0x04, 0x88, 0xad, 0xe4];

/// Mainnet version bytes for serialized public extended keys (`xpub`).
const VERSION_XPUB: [u8; 4] = [0x04, 0x88, 0xb2, 0x1e];

#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
struct ChainCode([u8; 32]);

/// A private or public extended key.
///
/// When `private_key` is present the public key is always its point.
/// Derivation never mutates a key; each step returns a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
    chain_code: ChainCode,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
}

impl ExtendedKey {
    /// Derive the master key from a seed using the standard domain constant.
    ///
    /// # Arguments
    /// * `seed` - 16 to 64 bytes of root material, usually a mnemonic seed.
    ///
    /// # Returns
    /// The master private key, `InvalidSeedLength`, or `InvalidMasterKey`
    /// if `I_L` is zero or not below the curve order.
    pub fn from_seed(seed: &[u8]) -> Result<Self, HdError> {
        Self::from_seed_with_domain(seed, MASTER_KEY_DOMAIN)
    }

    /// Derive the master key with a custom HMAC domain constant.
    pub fn from_seed_with_domain(seed: &[u8], domain: &[u8]) -> Result<Self, HdError> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(HdError::InvalidSeedLength(seed.len()));
        }

        let mut i = sha512_hmac(domain, seed);
        let master = PrivateKey::from_bytes(&i[..32]).map_err(|_| HdError::InvalidMasterKey);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let private_key = master?;
        let key = ExtendedKey {
            public_key: private_key.pub_key(),
            private_key: Some(private_key),
            chain_code: ChainCode(chain_code),
            depth: 0,
            parent_fingerprint: [0; 4],
            child_number: ChildNumber::Normal(0),
        };
        debug!(fingerprint = %hex::encode(key.fingerprint()), "created master key");
        Ok(key)
    }

    /// Derive the key at `path` below this key.
    ///
    /// An empty path returns a copy of this key. If a step lands on an
    /// invalid child, the next index with the same hardening is used, as
    /// BIP32 prescribes.
    pub fn derive(&self, path: &DerivationPath) -> Result<ExtendedKey, HdError> {
        let mut key = self.clone();
        for child in path {
            key = key.derive_child_or_next(*child)?;
        }
        Ok(key)
    }

    fn derive_child_or_next(&self, child: ChildNumber) -> Result<ExtendedKey, HdError> {
        retry_child(child, |current| self.derive_child(current))
    }

    /// One child-derivation step.
    ///
    /// # Returns
    /// The child key, or `InvalidChildKey` if `I_L >= n` or the resulting key
    /// is zero (or the point at infinity for public keys). The caller may
    /// retry with the next index. `IndexOutOfRange` if the index does not
    /// fit in 31 bits.
    pub fn derive_child(&self, child: ChildNumber) -> Result<ExtendedKey, HdError> {
        let child = child.check()?;
        let depth = self.depth.checked_add(1).ok_or(HdError::DepthOverflow)?;

        let mut data = Vec::with_capacity(37);
        match (&self.private_key, child) {
            (Some(private_key), ChildNumber::Hardened(_)) => {
                data.push(0x00);
                data.extend_from_slice(&private_key.to_bytes());
            }
            (None, ChildNumber::Hardened(_)) => return Err(HdError::HardenedOnPublicKey),
            (_, ChildNumber::Normal(_)) => {
                data.extend_from_slice(&self.public_key.to_compressed());
            }
        }
        data.extend_from_slice(&child.to_u32().to_be_bytes());

        let mut i = sha512_hmac(&self.chain_code.0, &data);
        data.zeroize();
        let mut tweak = [0u8; 32];
        tweak.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let derived = match &self.private_key {
            Some(private_key) => private_key
                .add_scalar(&tweak)
                .map(|k| (k.pub_key(), Some(k))),
            None => self.public_key.add_tweak(&tweak).map(|p| (p, None)),
        };
        tweak.zeroize();
        let (public_key, private_key) = derived.map_err(|_| HdError::InvalidChildKey(child))?;

        debug!(depth, child = %child, "derived child key");
        Ok(ExtendedKey {
            private_key,
            public_key,
            chain_code: ChainCode(chain_code),
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
        })
    }

    /// The public-only counterpart of this key.
    pub fn neuter(&self) -> ExtendedKey {
        ExtendedKey {
            private_key: None,
            ..self.clone()
        }
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code.0
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// The child index as serialized, with the hardened bit set when applicable.
    pub fn child_index(&self) -> u32 {
        self.child_number.to_u32()
    }

    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    pub fn is_private(&self) -> bool {
        self.private_key.is_some()
    }

    /// Hash160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        self.public_key.hash160()
    }

    /// First four bytes of the identifier.
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = self.identifier();
        [id[0], id[1], id[2], id[3]]
    }

    /// Serialize the public half as an `xpub` string.
    pub fn to_xpub(&self) -> String {
        let mut key = [0u8; 33];
        key.copy_from_slice(&self.public_key.to_compressed());
        base58::check_encode(&self.serialize(VERSION_XPUB, &key))
    }

    /// Serialize as an `xprv` string.
    ///
    /// # Returns
    /// `MissingPrivateKey` for a public-only key.
    pub fn to_xprv(&self) -> Result<String, HdError> {
        let private_key = self.private_key.as_ref().ok_or(HdError::MissingPrivateKey)?;
        let mut key = [0u8; 33];
        key[1..].copy_from_slice(&private_key.to_bytes());
        let mut payload = self.serialize(VERSION_XPRV, &key);
        key.zeroize();
        let encoded = base58::check_encode(&payload);
        payload.zeroize();
        Ok(encoded)
    }

    fn serialize(&self, version: [u8; 4], key: &[u8; 33]) -> Vec<u8> {
        let mut out = Vec::with_capacity(SERIALIZED_LEN);
        out.extend_from_slice(&version);
        out.push(self.depth);
        out.extend_from_slice(&self.parent_fingerprint);
        out.extend_from_slice(&self.child_index().to_be_bytes());
        out.extend_from_slice(&self.chain_code.0);
        out.extend_from_slice(key);
        out
    }

    fn deserialize(payload: &[u8]) -> Result<Self, HdError> {
        if payload.len() != SERIALIZED_LEN {
            return Err(HdError::InvalidExtendedKey(format!(
                "expected {} bytes, got {}",
                SERIALIZED_LEN,
                payload.len()
            )));
        }
        let version = &payload[0..4];
        let depth = payload[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&payload[5..9]);
        let mut raw_child = [0u8; 4];
        raw_child.copy_from_slice(&payload[9..13]);
        let child_number = ChildNumber::from_u32(u32::from_be_bytes(raw_child));
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&payload[13..45]);
        let key = &payload[45..78];

        if depth == 0 && (parent_fingerprint != [0; 4] || child_number.to_u32() != 0) {
            return Err(HdError::InvalidExtendedKey(
                "master key with non-zero parent or index".to_string(),
            ));
        }

        let (private_key, public_key) = if version == VERSION_XPRV {
            if key[0] != 0x00 {
                return Err(HdError::InvalidExtendedKey(
                    "private key data must start with 0x00".to_string(),
                ));
            }
            let private_key = PrivateKey::from_bytes(&key[1..])?;
            let public_key = private_key.pub_key();
            (Some(private_key), public_key)
        } else if version == VERSION_XPUB {
            (None, PublicKey::from_bytes(key)?)
        } else {
            return Err(HdError::InvalidExtendedKey(format!(
                "unknown version bytes {}",
                hex::encode(version)
            )));
        };

        Ok(ExtendedKey {
            private_key,
            public_key,
            chain_code: ChainCode(chain_code),
            depth,
            parent_fingerprint,
            child_number,
        })
    }
}

/// Run `step` on `child`, moving to the next index with the same hardening
/// for as long as it reports `InvalidChildKey`.
///
/// Fails with `InvalidChildKey` once the index space is exhausted.
fn retry_child<T>(
    child: ChildNumber,
    mut step: impl FnMut(ChildNumber) -> Result<T, HdError>,
) -> Result<T, HdError> {
    let mut current = child;
    loop {
        match step(current) {
            Err(HdError::InvalidChildKey(skipped)) => {
                warn!(child = %skipped, "invalid child key, trying next index");
                current = skipped.next().ok_or(HdError::InvalidChildKey(skipped))?;
            }
            result => return result,
        }
    }
}

impl FromStr for ExtendedKey {
    type Err = HdError;

    /// Parse an `xprv` or `xpub` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut payload = base58::check_decode(s)?;
        let key = Self::deserialize(&payload);
        payload.zeroize();
        key
    }
}

impl fmt::Display for ExtendedKey {
    /// Always the `xpub` form; private material is only produced by [`ExtendedKey::to_xprv`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xpub())
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("public_key", &self.public_key.to_hex())
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .field("is_private", &self.is_private())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::HARDENED_OFFSET;
    use web3_primitives::ErrorKind;

    const SEED_1: &str = "000102030405060708090a0b0c0d0e0f";

    const M_XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";
    const M_XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
    const M_0H_XPRV: &str = "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7";
    const M_0H_XPUB: &str = "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw";
    const M_0H_1_XPRV: &str = "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs";
    const M_0H_1_XPUB: &str = "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ";

    fn master() -> ExtendedKey {
        ExtendedKey::from_seed(&hex::decode(SEED_1).unwrap()).unwrap()
    }

    #[test]
    fn test_master_key_vector_1() {
        let m = master();
        assert_eq!(
            m.private_key().unwrap().to_hex(),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(m.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(
            m.public_key().to_hex(),
            "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2"
        );
        assert_eq!(hex::encode(m.fingerprint()), "3442193e");
        assert_eq!(m.depth(), 0);
        assert_eq!(m.parent_fingerprint(), [0; 4]);
        assert_eq!(m.child_index(), 0);
        assert_eq!(m.to_xprv().unwrap(), M_XPRV);
        assert_eq!(m.to_xpub(), M_XPUB);
    }

    #[test]
    fn test_hardened_child_vector_1() {
        let path: DerivationPath = "m/0'".parse().unwrap();
        let child = master().derive(&path).unwrap();
        assert_eq!(
            child.private_key().unwrap().to_hex(),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(
            hex::encode(child.chain_code()),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
        assert_eq!(
            child.public_key().to_hex(),
            "035a784662a4a20a65bf6aab9ae98a6c068a81c52e4b032c0fb5400c706cfccc56"
        );
        assert_eq!(child.depth(), 1);
        assert_eq!(hex::encode(child.parent_fingerprint()), "3442193e");
        assert_eq!(child.child_index(), 0x8000_0000);
        assert_eq!(child.to_xprv().unwrap(), M_0H_XPRV);
        assert_eq!(child.to_xpub(), M_0H_XPUB);
    }

    #[test]
    fn test_normal_child_vector_1() {
        let path: DerivationPath = "m/0'/1".parse().unwrap();
        let child = master().derive(&path).unwrap();
        assert_eq!(child.to_xprv().unwrap(), M_0H_1_XPRV);
        assert_eq!(child.to_xpub(), M_0H_1_XPUB);
        assert_eq!(child.child_index(), 1);
    }

    #[test]
    fn test_public_derivation_matches_private() {
        let parent = master().derive(&"m/0'".parse().unwrap()).unwrap();
        let public_child = parent.neuter().derive_child(ChildNumber::Normal(1)).unwrap();
        assert!(!public_child.is_private());
        assert_eq!(public_child.to_xpub(), M_0H_1_XPUB);
    }

    #[test]
    fn test_hardened_on_public_key_fails() {
        let public = master().neuter();
        let err = public.derive_child(ChildNumber::Hardened(0)).unwrap_err();
        assert!(matches!(err, HdError::HardenedOnPublicKey));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(public.to_xprv(), Err(HdError::MissingPrivateKey)));
    }

    #[test]
    fn test_empty_path_returns_same_key() {
        let m = master();
        assert_eq!(m.derive(&DerivationPath::master()).unwrap(), m);
    }

    #[test]
    fn test_derivation_is_order_sensitive_and_repeatable() {
        let m = master();
        let a = m.derive(&"m/0/1".parse().unwrap()).unwrap();
        let b = m.derive(&"m/1/0".parse().unwrap()).unwrap();
        let a2 = m.derive(&"m/0/1".parse().unwrap()).unwrap();
        assert_ne!(a.private_key().unwrap(), b.private_key().unwrap());
        assert_eq!(a.private_key().unwrap(), a2.private_key().unwrap());
        assert_eq!(a.chain_code(), a2.chain_code());
    }

    #[test]
    fn test_seed_length_bounds() {
        assert!(matches!(
            ExtendedKey::from_seed(&[0u8; 15]),
            Err(HdError::InvalidSeedLength(15))
        ));
        assert!(matches!(
            ExtendedKey::from_seed(&[0u8; 65]),
            Err(HdError::InvalidSeedLength(65))
        ));
        assert!(ExtendedKey::from_seed(&[0u8; 64]).is_ok());
    }

    #[test]
    fn test_custom_domain_changes_master() {
        let seed = hex::decode(SEED_1).unwrap();
        let other = ExtendedKey::from_seed_with_domain(&seed, b"ed25519 seed").unwrap();
        assert_ne!(other.private_key(), master().private_key());
    }

    #[test]
    fn test_parse_serialized_keys() {
        let parsed: ExtendedKey = M_0H_XPRV.parse().unwrap();
        assert!(parsed.is_private());
        assert_eq!(parsed, master().derive(&"m/0'".parse().unwrap()).unwrap());

        let public: ExtendedKey = M_0H_XPUB.parse().unwrap();
        assert!(!public.is_private());
        assert_eq!(public.to_xpub(), M_0H_XPUB);
        assert_eq!(public.child_number(), ChildNumber::Hardened(0));
    }

    #[test]
    fn test_parse_rejects_corrupt_keys() {
        let mut corrupt = M_XPUB.to_string();
        corrupt.replace_range(10..11, if &corrupt[10..11] == "a" { "b" } else { "a" });
        assert!(corrupt.parse::<ExtendedKey>().is_err());
        assert!("xpub".parse::<ExtendedKey>().is_err());
        assert!(base58::check_encode(&[0u8; 10]).parse::<ExtendedKey>().is_err());
    }

    #[test]
    fn test_display_is_public() {
        let m = master();
        let rendered = format!("{} {:?}", m, m);
        assert!(rendered.contains(M_XPUB));
        assert!(!rendered.contains(&m.private_key().unwrap().to_hex()));
        assert!(!rendered.contains(M_XPRV));
    }

    #[test]
    fn test_out_of_range_child_is_rejected() {
        let m = master();
        let err = m.derive_child(ChildNumber::Normal(HARDENED_OFFSET)).unwrap_err();
        assert!(matches!(err, HdError::IndexOutOfRange(0x8000_0000)));
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(m.derive_child(ChildNumber::Hardened(u32::MAX)).is_err());
        assert!(m.neuter().derive_child(ChildNumber::Normal(u32::MAX)).is_err());
    }

    #[test]
    fn test_retry_moves_to_next_index() {
        let mut attempts = Vec::new();
        let chosen = retry_child(ChildNumber::Hardened(5), |child| {
            attempts.push(child);
            if child.index() < 7 {
                Err(HdError::InvalidChildKey(child))
            } else {
                Ok(child)
            }
        })
        .unwrap();
        assert_eq!(chosen, ChildNumber::Hardened(7));
        assert_eq!(
            attempts,
            vec![
                ChildNumber::Hardened(5),
                ChildNumber::Hardened(6),
                ChildNumber::Hardened(7),
            ]
        );
    }

    #[test]
    fn test_retry_exhaustion_and_other_errors() {
        let last = ChildNumber::Normal(HARDENED_OFFSET - 1);
        let err = retry_child(last, |child| -> Result<(), HdError> {
            Err(HdError::InvalidChildKey(child))
        })
        .unwrap_err();
        assert!(matches!(err, HdError::InvalidChildKey(c) if c == last));

        let mut calls = 0;
        let err = retry_child(ChildNumber::Normal(0), |_| -> Result<(), HdError> {
            calls += 1;
            Err(HdError::HardenedOnPublicKey)
        })
        .unwrap_err();
        assert!(matches!(err, HdError::HardenedOnPublicKey));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_depth_overflow() {
        let mut key = master().neuter();
        for index in 0..255 {
            key = key.derive_child(ChildNumber::Normal(index)).unwrap();
        }
        assert_eq!(key.depth(), 255);
        let err = key.derive_child(ChildNumber::Normal(0)).unwrap_err();
        assert!(matches!(err, HdError::DepthOverflow));
    }
}
