//! Child numbers and derivation paths such as `m/44'/60'/0'/0/0`.

use std::fmt;
use std::str::FromStr;

use crate::error::HdError;

/// Offset added to an index to mark it hardened.
pub const HARDENED_OFFSET: u32 = 1 << 31;

/// One step of a derivation path: a 31-bit index, optionally hardened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildNumber {
    Normal(u32),
    Hardened(u32),
}

impl ChildNumber {
    /// A non-hardened child; `index` must be below 2^31.
    pub fn normal(index: u32) -> Result<Self, HdError> {
        check_index(index as u64)?;
        Ok(ChildNumber::Normal(index))
    }

    /// A hardened child; `index` must be below 2^31.
    pub fn hardened(index: u32) -> Result<Self, HdError> {
        check_index(index as u64)?;
        Ok(ChildNumber::Hardened(index))
    }

    /// Decode the serialized form, where the top bit marks hardening.
    pub fn from_u32(raw: u32) -> Self {
        if raw & HARDENED_OFFSET != 0 {
            ChildNumber::Hardened(raw & !HARDENED_OFFSET)
        } else {
            ChildNumber::Normal(raw)
        }
    }

    /// The serialized form, with the hardened bit set when applicable.
    pub fn to_u32(self) -> u32 {
        match self {
            ChildNumber::Normal(index) => index,
            ChildNumber::Hardened(index) => index | HARDENED_OFFSET,
        }
    }

    /// The index without the hardened bit.
    pub fn index(self) -> u32 {
        match self {
            ChildNumber::Normal(index) | ChildNumber::Hardened(index) => index,
        }
    }

    pub fn is_hardened(self) -> bool {
        matches!(self, ChildNumber::Hardened(_))
    }

    /// Fail with `IndexOutOfRange` when the index does not fit in 31 bits.
    ///
    /// The variants are public, so a value built directly may carry an index
    /// that would collide with the hardened bit when serialized.
    pub fn check(self) -> Result<Self, HdError> {
        check_index(self.index() as u64)?;
        Ok(self)
    }

    /// The following index with the same hardening, or `None` past 2^31 - 1.
    pub fn next(self) -> Option<Self> {
        let index = self.index().checked_add(1).filter(|i| *i < HARDENED_OFFSET)?;
        Some(match self {
            ChildNumber::Normal(_) => ChildNumber::Normal(index),
            ChildNumber::Hardened(_) => ChildNumber::Hardened(index),
        })
    }
}

fn check_index(index: u64) -> Result<(), HdError> {
    if index >= HARDENED_OFFSET as u64 {
        return Err(HdError::IndexOutOfRange(index));
    }
    Ok(())
}

impl FromStr for ChildNumber {
    type Err = HdError;

    /// Parse `"7"`, `"7'"`, `"7h"` or `"7H"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix(|c: char| matches!(c, '\'' | 'h' | 'H')) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HdError::InvalidPathSyntax(format!("bad path segment '{}'", s)));
        }
        let index: u64 = digits
            .parse()
            .map_err(|_| HdError::IndexOutOfRange(u64::MAX))?;
        check_index(index)?;
        let index = index as u32;
        Ok(if hardened {
            ChildNumber::Hardened(index)
        } else {
            ChildNumber::Normal(index)
        })
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildNumber::Normal(index) => write!(f, "{}", index),
            ChildNumber::Hardened(index) => write!(f, "{}'", index),
        }
    }
}

/// An ordered list of child numbers locating a key below the master key.
///
/// The empty path, written `m`, addresses the master key itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path `m`.
    pub fn master() -> Self {
        DerivationPath(Vec::new())
    }

    /// Append a child; its index must be below 2^31.
    pub fn push(&mut self, child: ChildNumber) -> Result<(), HdError> {
        self.0.push(child.check()?);
        Ok(())
    }

    /// A new path extended by one child.
    pub fn child(&self, child: ChildNumber) -> Result<Self, HdError> {
        let mut path = self.clone();
        path.push(child)?;
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChildNumber> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl TryFrom<Vec<ChildNumber>> for DerivationPath {
    type Error = HdError;

    fn try_from(children: Vec<ChildNumber>) -> Result<Self, Self::Error> {
        for child in &children {
            child.check()?;
        }
        Ok(DerivationPath(children))
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = HdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.trim().split('/');
        if segments.next() != Some("m") {
            return Err(HdError::InvalidPathSyntax(
                "path must start with 'm'".to_string(),
            ));
        }
        segments
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}
