use serde::{Deserialize, Serialize};
use web3_bip39::{Bip39Error, VALID_STRENGTHS};
use web3_hd::MASTER_KEY_DOMAIN;
use web3_primitives::ec::RecoveryIdFormat;
use web3_wallet::WalletConfig;

use crate::error::Web3Error;

/// Settings for the call surface.
///
/// Missing JSON fields take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encoding of the `v` byte in produced signatures.
    pub recovery_id: RecoveryIdFormat,
    /// HMAC key for master key generation.
    pub master_key_domain: String,
    /// Entropy strength in bits used by [`crate::api::generate_mnemonic_with`].
    pub default_strength: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            recovery_id: RecoveryIdFormat::default(),
            master_key_domain: String::from_utf8_lossy(MASTER_KEY_DOMAIN).into_owned(),
            default_strength: 128,
        }
    }
}

impl Config {
    /// Parse and validate a JSON settings blob.
    ///
    /// # Returns
    /// `InvalidConfig` for malformed JSON or an empty domain, and
    /// `InvalidStrength` when `default_strength` is not a BIP39 strength.
    pub fn from_json(json: &str) -> Result<Self, Web3Error> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a JSON blob cannot constrain by type.
    pub fn validate(&self) -> Result<(), Web3Error> {
        if self.master_key_domain.is_empty() {
            return Err(Web3Error::InvalidConfig(
                "master_key_domain must not be empty".to_string(),
            ));
        }
        if !VALID_STRENGTHS.contains(&self.default_strength) {
            return Err(Bip39Error::InvalidStrength(self.default_strength).into());
        }
        Ok(())
    }

    /// The wallet settings carried by this config.
    pub fn wallet_config(&self) -> WalletConfig {
        WalletConfig {
            recovery_id: self.recovery_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.master_key_domain, "Bitcoin seed");
        assert_eq!(config.default_strength, 128);
        assert_eq!(config.wallet_config(), WalletConfig::ethereum());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(r#"{"recovery_id":"raw","default_strength":256}"#).unwrap();
        assert_eq!(config.wallet_config(), WalletConfig::raw());
        assert_eq!(config.default_strength, 256);
        assert_eq!(config.master_key_domain, "Bitcoin seed");
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = Config::from_json(r#"{"default_strength":100}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = Config::from_json(r#"{"master_key_domain":""}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, Web3Error::InvalidConfig(_)));
    }
}
