//! The canonical 2048-word English list.

/// Number of words in a list; each word encodes 11 bits.
pub const WORD_COUNT: usize = 2048;

/// A static, immutable word list mapping 11-bit indices to words.
///
/// The English list is sorted, so lookups are a binary search. The table
/// is `'static` and may be shared across threads freely.
#[derive(Clone, Copy, Debug)]
pub struct WordList {
    words: &'static [&'static str; WORD_COUNT],
}

impl WordList {
    /// The English list.
    pub fn english() -> Self {
        WordList {
            words: bip39::Language::English.word_list(),
        }
    }

    /// The word at an 11-bit index, or `None` when `index >= 2048`.
    pub fn word(&self, index: u16) -> Option<&'static str> {
        self.words.get(index as usize).copied()
    }

    /// The index of a word, or `None` when the word is not in the list.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.words
            .binary_search(&word)
            .ok()
            .map(|index| index as u16)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::english()
    }
}
