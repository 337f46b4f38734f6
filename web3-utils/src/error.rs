use web3_bip39::Bip39Error;
use web3_hd::HdError;
use web3_primitives::{ErrorKind, PrimitivesError};
use web3_wallet::WalletError;

/// Any error produced by the call surface.
#[derive(Debug, thiserror::Error)]
pub enum Web3Error {
    /// Malformed or inconsistent configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Hashing, encoding or key errors.
    #[error(transparent)]
    Primitives(#[from] PrimitivesError),
    /// Entropy and mnemonic errors.
    #[error(transparent)]
    Bip39(#[from] Bip39Error),
    /// Path and derivation errors.
    #[error(transparent)]
    Hd(#[from] HdError),
    /// Account and signing errors.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl Web3Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Web3Error::InvalidConfig(_) => ErrorKind::Format,
            Web3Error::Primitives(e) => e.kind(),
            Web3Error::Bip39(e) => e.kind(),
            Web3Error::Hd(e) => e.kind(),
            Web3Error::Wallet(e) => e.kind(),
        }
    }
}

impl From<serde_json::Error> for Web3Error {
    fn from(e: serde_json::Error) -> Self {
        Web3Error::InvalidConfig(e.to_string())
    }
}
