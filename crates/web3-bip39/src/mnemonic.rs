//! Mnemonic phrase encoding, validation and seed derivation.
//!
//! A phrase is the entropy bits followed by `bits / 32` checksum bits taken
//! from SHA-256 of the entropy, split into 11-bit groups and mapped through
//! the word list. The seed is PBKDF2-HMAC-SHA512 over the NFKD phrase with
//! salt `"mnemonic" || NFKD(passphrase)` and 2048 rounds.

use std::fmt;

use tracing::{debug, trace};
use unicode_normalization::UnicodeNormalization;
use web3_primitives::hash::{pbkdf2_sha512, sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::entropy::Entropy;
use crate::error::Bip39Error;
use crate::seed::Seed;
use crate::wordlist::WordList;

/// Permitted phrase lengths.
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// PBKDF2 iteration count for seed derivation.
pub const PBKDF2_ROUNDS: u32 = 2048;

const SALT_PREFIX: &str = "mnemonic";

/// A word phrase plus optional passphrase.
///
/// The phrase is held NFKD-normalized with single spaces between words.
/// A `Mnemonic` built with [`Mnemonic::from_phrase_unchecked`] may hold an
/// invalid phrase; [`Mnemonic::is_valid`] reports whether it decodes.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    phrase: String,
    passphrase: String,
}

impl Mnemonic {
    /// Encode entropy as a phrase. Deterministic and total.
    pub fn from_entropy(entropy: &Entropy) -> Self {
        Mnemonic {
            phrase: encode(entropy.as_bytes(), &WordList::english()),
            passphrase: String::new(),
        }
    }

    /// Generate a phrase from fresh entropy of the given strength.
    pub fn generate(strength_bits: usize) -> Result<Self, Bip39Error> {
        let entropy = Entropy::generate(strength_bits)?;
        Ok(Self::from_entropy(&entropy))
    }

    /// Parse and validate a phrase.
    ///
    /// # Arguments
    /// * `phrase` - Words separated by any whitespace.
    /// * `passphrase` - Optional extra secret mixed into the seed; `""` for none.
    ///
    /// # Returns
    /// The mnemonic, or `MalformedPhrase` for a bad word count, `UnknownWord`
    /// for a word outside the list, `ChecksumMismatch` for a bad checksum.
    pub fn from_phrase(phrase: &str, passphrase: &str) -> Result<Self, Bip39Error> {
        let mnemonic = Self::from_phrase_unchecked(phrase, passphrase);
        mnemonic.validate()?;
        Ok(mnemonic)
    }

    /// Normalize a phrase without validating it.
    pub fn from_phrase_unchecked(phrase: &str, passphrase: &str) -> Self {
        Mnemonic {
            phrase: normalize_phrase(phrase),
            passphrase: passphrase.nfkd().collect(),
        }
    }

    /// A copy of this mnemonic with a different passphrase.
    pub fn with_passphrase(&self, passphrase: &str) -> Self {
        Mnemonic {
            phrase: self.phrase.clone(),
            passphrase: passphrase.nfkd().collect(),
        }
    }

    /// The normalized phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.phrase.split(' ').filter(|w| !w.is_empty())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// Recover the entropy the phrase encodes.
    pub fn entropy(&self) -> Result<Entropy, Bip39Error> {
        decode(&self.phrase, &WordList::english())
    }

    /// Check word count, vocabulary and checksum.
    pub fn validate(&self) -> Result<(), Bip39Error> {
        self.entropy().map(|_| ())
    }

    /// Whether the phrase decodes without error. Never fails.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Stretch the phrase and passphrase into a 64-byte seed.
    ///
    /// Runs regardless of validity; check [`Mnemonic::is_valid`] first
    /// when that matters.
    pub fn seed(&self) -> Seed {
        trace!(word_count = self.word_count(), "deriving seed");
        let mut salt = String::with_capacity(SALT_PREFIX.len() + self.passphrase.len());
        salt.push_str(SALT_PREFIX);
        salt.push_str(&self.passphrase);
        let seed = Seed::new(pbkdf2_sha512(
            self.phrase.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
        ));
        salt.zeroize();
        seed
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("has_passphrase", &!self.passphrase.is_empty())
            .finish_non_exhaustive()
    }
}

/// NFKD-normalize and collapse whitespace to single spaces.
fn normalize_phrase(phrase: &str) -> String {
    let normalized: String = phrase.nfkd().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read bit `index` (MSB first) of the entropy-plus-checksum stream.
fn stream_bit(entropy: &[u8], checksum: u8, index: usize) -> bool {
    let entropy_bits = entropy.len() * 8;
    if index < entropy_bits {
        (entropy[index / 8] >> (7 - index % 8)) & 1 == 1
    } else {
        (checksum >> (7 - (index - entropy_bits))) & 1 == 1
    }
}

fn encode(entropy: &[u8], words: &WordList) -> String {
    // At most 8 checksum bits, so the first digest byte is enough.
    let checksum = sha256(entropy)[0];
    let total_bits = entropy.len() * 8 + entropy.len() * 8 / 32;

    let mut phrase = String::new();
    for group in 0..total_bits / 11 {
        let mut index = 0u16;
        for bit in 0..11 {
            index = (index << 1) | stream_bit(entropy, checksum, group * 11 + bit) as u16;
        }
        if group > 0 {
            phrase.push(' ');
        }
        // index < 2048 by construction
        phrase.push_str(words.word(index).unwrap_or_default());
    }
    phrase
}

fn decode(phrase: &str, list: &WordList) -> Result<Entropy, Bip39Error> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if !VALID_WORD_COUNTS.contains(&words.len()) {
        return Err(Bip39Error::MalformedPhrase {
            word_count: words.len(),
        });
    }

    let total_bits = words.len() * 11;
    let checksum_bits = total_bits / 33;
    let entropy_bytes = (total_bits - checksum_bits) / 8;

    let mut buf = vec![0u8; (total_bits + 7) / 8];
    for (position, word) in words.iter().enumerate() {
        let index = match list.index_of(word) {
            Some(index) => index,
            None => {
                buf.zeroize();
                return Err(Bip39Error::UnknownWord { position });
            }
        };
        for bit in 0..11 {
            if (index >> (10 - bit)) & 1 == 1 {
                let pos = position * 11 + bit;
                buf[pos / 8] |= 1 << (7 - pos % 8);
            }
        }
    }

    let entropy = Entropy::from_bytes(&buf[..entropy_bytes]);
    let expected = sha256(&buf[..entropy_bytes])[0] >> (8 - checksum_bits);
    let actual = buf[entropy_bytes] >> (8 - checksum_bits);
    buf.zeroize();

    if expected != actual {
        debug!(word_count = words.len(), "mnemonic checksum mismatch");
        return Err(Bip39Error::ChecksumMismatch);
    }
    entropy
}
