use web3_primitives::{ErrorKind, PrimitivesError};

use crate::path::ChildNumber;

/// Error types for path parsing and key derivation.
#[derive(Debug, thiserror::Error)]
pub enum HdError {
    #[error("invalid path syntax: {0}")]
    InvalidPathSyntax(String),
    #[error("child index {0} is out of range (must be below 2^31)")]
    IndexOutOfRange(u64),
    #[error("invalid seed length: {0} bytes (expected 16 to 64)")]
    InvalidSeedLength(usize),
    #[error("master key is zero or not below the curve order")]
    InvalidMasterKey,
    #[error("invalid child key at index {0}")]
    InvalidChildKey(ChildNumber),
    #[error("hardened derivation requires a private key")]
    HardenedOnPublicKey,
    #[error("extended key has no private key")]
    MissingPrivateKey,
    #[error("maximum derivation depth exceeded")]
    DepthOverflow,
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

impl HdError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HdError::InvalidPathSyntax(_)
            | HdError::InvalidSeedLength(_)
            | HdError::InvalidExtendedKey(_) => ErrorKind::Format,
            HdError::IndexOutOfRange(_) | HdError::DepthOverflow => ErrorKind::Range,
            HdError::InvalidMasterKey
            | HdError::InvalidChildKey(_)
            | HdError::HardenedOnPublicKey
            | HdError::MissingPrivateKey => ErrorKind::Validation,
            HdError::Primitives(e) => e.kind(),
        }
    }
}
