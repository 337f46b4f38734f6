use web3_primitives::{ErrorKind, PrimitivesError};

/// Error types for mnemonic, entropy and seed operations.
#[derive(Debug, thiserror::Error)]
pub enum Bip39Error {
    #[error("invalid strength: {0} bits (expected 128, 160, 192, 224 or 256)")]
    InvalidStrength(usize),
    #[error("invalid entropy length: {0} bytes")]
    InvalidEntropyLength(usize),
    #[error("malformed phrase: {word_count} words (expected 12, 15, 18, 21 or 24)")]
    MalformedPhrase { word_count: usize },
    #[error("unknown word at position {position}")]
    UnknownWord { position: usize },
    #[error("mnemonic checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid seed length: expected 64 bytes, got {0}")]
    InvalidSeedLength(usize),
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

impl Bip39Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Bip39Error::InvalidStrength(_) | Bip39Error::InvalidEntropyLength(_) => ErrorKind::Range,
            Bip39Error::MalformedPhrase { .. }
            | Bip39Error::UnknownWord { .. }
            | Bip39Error::InvalidSeedLength(_) => ErrorKind::Format,
            Bip39Error::ChecksumMismatch => ErrorKind::Validation,
            Bip39Error::EntropyUnavailable(_) => ErrorKind::Fatal,
            Bip39Error::Primitives(e) => e.kind(),
        }
    }
}
