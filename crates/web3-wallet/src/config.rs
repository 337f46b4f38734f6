//! Wallet configuration.

use serde::{Deserialize, Serialize};
use web3_primitives::ec::RecoveryIdFormat;

/// Settings that change the bytes a wallet produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Encoding of the trailing `v` byte of serialized signatures.
    pub recovery_id: RecoveryIdFormat,
}

impl WalletConfig {
    /// `v` in {27, 28}, as produced by Ethereum JSON-RPC signers.
    pub fn ethereum() -> Self {
        WalletConfig {
            recovery_id: RecoveryIdFormat::Electrum,
        }
    }

    /// `v` in {0, 1}.
    pub fn raw() -> Self {
        WalletConfig {
            recovery_id: RecoveryIdFormat::Raw,
        }
    }
}
