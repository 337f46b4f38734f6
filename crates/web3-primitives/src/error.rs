use std::fmt;

/// Broad class of a failure, shared by every error type in the workspace.
///
/// Every error is recoverable by supplying corrected input, except `Fatal`,
/// which is reserved for an unavailable random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input could not be parsed (bad hex, bad phrase shape, bad path syntax).
    Format,
    /// Input parsed but failed a cryptographic or checksum check.
    Validation,
    /// A numeric parameter was outside its permitted range.
    Range,
    /// No valid output can be produced at all.
    Fatal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Format => "format",
            ErrorKind::Validation => "validation",
            ErrorKind::Range => "range",
            ErrorKind::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Unified error type for all primitives operations.
///
/// Covers errors from hashing, EC operations and encoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),
}

impl PrimitivesError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrimitivesError::InvalidHex(_)
            | PrimitivesError::InvalidBase58(_)
            | PrimitivesError::InvalidKeyLength { .. } => ErrorKind::Format,
            PrimitivesError::InvalidPrivateKey(_)
            | PrimitivesError::InvalidPublicKey(_)
            | PrimitivesError::InvalidSignature(_)
            | PrimitivesError::ChecksumMismatch
            | PrimitivesError::PointNotOnCurve => ErrorKind::Validation,
        }
    }
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
