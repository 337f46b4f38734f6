//! Hex-in / hex-out calls for language bindings.
//!
//! Byte outputs are lowercase hex with no prefix. Hex inputs may carry a
//! `0x` prefix.

use serde::{Deserialize, Serialize};
use web3_bip39::{Entropy, Mnemonic};
use web3_hd::{DerivationPath, ExtendedKey};
use web3_primitives::util::{decode_hex, encode_hex};
use web3_wallet::Wallet;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::error::Web3Error;

/// Public account data for a private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// 20-byte address, lowercase hex.
    pub address: String,
    /// 33-byte compressed public key, lowercase hex.
    pub public_key: String,
}

/// Generate fresh entropy.
///
/// # Arguments
/// * `strength_bits` - One of 128, 160, 192, 224 or 256.
///
/// # Returns
/// `strength_bits / 8` random bytes as hex.
pub fn generate_entropy(strength_bits: usize) -> Result<String, Web3Error> {
    Ok(Entropy::generate(strength_bits)?.to_hex())
}

/// Generate a new random phrase of the given strength.
pub fn generate_mnemonic(strength_bits: usize) -> Result<String, Web3Error> {
    Ok(Mnemonic::generate(strength_bits)?.phrase().to_string())
}

/// Generate a new random phrase with the configured default strength.
pub fn generate_mnemonic_with(config: &Config) -> Result<String, Web3Error> {
    generate_mnemonic(config.default_strength)
}

/// Encode hex entropy as a phrase.
pub fn mnemonic_from_entropy(entropy_hex: &str) -> Result<String, Web3Error> {
    let entropy = Entropy::from_hex(entropy_hex)?;
    Ok(Mnemonic::from_entropy(&entropy).phrase().to_string())
}

/// Stretch a phrase into its 64-byte seed.
///
/// Unlike [`Mnemonic::seed`], the phrase must be valid: a wrong word count,
/// an unknown word or a bad checksum is returned as an error.
pub fn seed_from_mnemonic(phrase: &str, passphrase: &str) -> Result<String, Web3Error> {
    let mnemonic = Mnemonic::from_phrase(phrase, passphrase)?;
    Ok(mnemonic.seed().to_hex())
}

/// Derive the private key at `path` from a hex seed.
///
/// # Arguments
/// * `seed_hex` - 16 to 64 bytes of seed, hex encoded.
/// * `path` - A path such as `m/44'/60'/0'/0/0`.
///
/// # Returns
/// The 32-byte child private key as hex.
pub fn derive(seed_hex: &str, path: &str) -> Result<String, Web3Error> {
    derive_with(&Config::default(), seed_hex, path)
}

/// [`derive`] with the configured master key domain.
pub fn derive_with(config: &Config, seed_hex: &str, path: &str) -> Result<String, Web3Error> {
    let path: DerivationPath = path.parse()?;
    let seed = Zeroizing::new(decode_hex(seed_hex)?);
    let master = ExtendedKey::from_seed_with_domain(&seed, config.master_key_domain.as_bytes())?;
    let child = master.derive(&path)?;
    let private_key = child.private_key().ok_or(web3_hd::HdError::MissingPrivateKey)?;
    Ok(private_key.to_hex())
}

/// Address and public key for a hex private key.
pub fn account_info(private_key_hex: &str) -> Result<AccountInfo, Web3Error> {
    let wallet = Wallet::from_hex(private_key_hex)?;
    Ok(AccountInfo {
        address: wallet.address().to_hex(),
        public_key: encode_hex(wallet.public_key_compressed()),
    })
}

/// Sign `keccak256(message)` and return `r || s || v` as hex.
pub fn sign(private_key_hex: &str, message_hex: &str) -> Result<String, Web3Error> {
    sign_with(&Config::default(), private_key_hex, message_hex)
}

/// [`sign`] with the configured recovery id encoding.
pub fn sign_with(
    config: &Config,
    private_key_hex: &str,
    message_hex: &str,
) -> Result<String, Web3Error> {
    let message = decode_hex(message_hex)?;
    let wallet = Wallet::from_hex(private_key_hex)?.with_config(config.wallet_config());
    Ok(encode_hex(wallet.sign(&message)?))
}

/// Personal-message hash of `message`, as hex.
pub fn hash_message(message: impl AsRef<[u8]>) -> String {
    encode_hex(web3_wallet::hash_message(message))
}
