use web3_primitives::{ErrorKind, PrimitivesError};

/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("address checksum does not match")]
    AddressChecksumMismatch,
    #[error("extended key has no private key")]
    MissingPrivateKey,
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

impl WalletError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::InvalidAddress(_) => ErrorKind::Format,
            WalletError::AddressChecksumMismatch | WalletError::MissingPrivateKey => {
                ErrorKind::Validation
            }
            WalletError::Primitives(e) => e.kind(),
        }
    }
}
