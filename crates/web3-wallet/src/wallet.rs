//! Wallet: one private key and the account derived from it.

use std::fmt;

use tracing::debug;
use web3_hd::ExtendedKey;
use web3_primitives::ec::{PrivateKey, PublicKey, Signature, SIGNATURE_LEN};
use web3_primitives::hash::keccak256;

use crate::address::Address;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::message::hash_message;

/// A single-key account.
///
/// The public key and address are computed once at construction and are
/// pure functions of the private key.
#[derive(Clone, PartialEq, Eq)]
pub struct Wallet {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: Address,
    config: WalletConfig,
}

impl Wallet {
    /// Create a wallet from a private key with the default configuration.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.pub_key();
        let address = Address::from_public_key(&public_key);
        Wallet {
            private_key,
            public_key,
            address,
            config: WalletConfig::default(),
        }
    }

    /// Create a wallet from a 64-digit hex private key (optional `0x`).
    ///
    /// # Returns
    /// A Format error for malformed hex, or `InvalidPrivateKey` when the
    /// scalar is zero or not below the curve order.
    pub fn from_hex(hex_str: &str) -> Result<Self, WalletError> {
        Ok(Self::from_private_key(PrivateKey::from_hex(hex_str)?))
    }

    /// Create a wallet from the private half of an extended key.
    pub fn from_extended_key(key: &ExtendedKey) -> Result<Self, WalletError> {
        let private_key = key.private_key().ok_or(WalletError::MissingPrivateKey)?;
        Ok(Self::from_private_key(private_key.clone()))
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: WalletConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// 33-byte SEC1 compressed public key.
    pub fn public_key_compressed(&self) -> [u8; 33] {
        self.public_key.to_compressed()
    }

    /// 64-byte `x || y` public key, the form hashed into the address.
    pub fn public_key_uncompressed(&self) -> [u8; 64] {
        self.public_key.to_raw_coordinates()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign `keccak256(message)`.
    ///
    /// # Arguments
    /// * `message` - Raw message bytes; they are hashed once, without any prefix.
    ///
    /// # Returns
    /// `r || s || v`, 65 bytes, with `s` in low form and `v` encoded per
    /// the wallet's [`WalletConfig`]. Signing the same message twice yields
    /// identical bytes.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN], WalletError> {
        let signature = self.sign_hash(&keccak256(message))?;
        Ok(signature.to_bytes(self.config.recovery_id))
    }

    /// Sign a message with the personal-message prefix applied first.
    pub fn sign_personal_message(
        &self,
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN], WalletError> {
        let signature = self.sign_hash(&hash_message(message))?;
        Ok(signature.to_bytes(self.config.recovery_id))
    }

    /// Sign a precomputed 32-byte hash.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature, WalletError> {
        debug!(address = %self.address, "signing hash");
        Ok(self.private_key.sign_recoverable(hash)?)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address.to_checksum())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
