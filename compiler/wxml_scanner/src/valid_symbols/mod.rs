//! The set of token kinds acceptable at the current parse state.
//!
//! Uses a `u8` bitset for O(1) membership testing, one bit per
//! [`TokenKind`] discriminant.

use std::fmt;

use crate::TokenKind;

const _: () = assert!(
    TokenKind::COUNT <= 8,
    "ValidSymbols uses a u8 bitset; all discriminant indices must be < 8"
);

/// Token kinds the grammar engine accepts at one decision point.
///
/// # Example
/// ```
/// use wxml_scanner::{TokenKind, ValidSymbols};
///
/// const CONTENT: ValidSymbols = ValidSymbols::new()
///     .with(TokenKind::InterpolationStart)
///     .with(TokenKind::Comment);
///
/// assert!(CONTENT.contains(TokenKind::Comment));
/// assert!(!CONTENT.contains(TokenKind::RawText));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValidSymbols(u8);

impl ValidSymbols {
    /// Create an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Set containing every token kind.
    #[inline]
    pub const fn all() -> Self {
        Self((1u8 << TokenKind::COUNT) - 1)
    }

    /// Set containing a single token kind.
    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self(1u8 << kind.index())
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u8 << kind.index()))
    }

    /// Union of two sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Build a set from the engine's boolean array, indexed by discriminant.
    ///
    /// Entries beyond the last token kind are ignored.
    pub fn from_flags(flags: &[bool]) -> Self {
        flags
            .iter()
            .zip(TokenKind::ALL)
            .filter(|(on, _)| **on)
            .fold(Self::new(), |set, (_, kind)| set.with(kind))
    }

    /// Check if this set contains a token kind.
    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        (self.0 & (1u8 << kind.index())) != 0
    }

    /// Check if this set shares any kind with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Check if this set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of token kinds in this set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Add a token kind to this set.
    #[inline]
    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= 1u8 << kind.index();
    }

    /// Iterate over the kinds in this set, in discriminant order.
    pub fn iter(self) -> ValidSymbolsIter {
        ValidSymbolsIter { bits: self.0 }
    }
}

/// Iterator over the kinds in a [`ValidSymbols`] set.
pub struct ValidSymbolsIter {
    bits: u8,
}

impl Iterator for ValidSymbolsIter {
    type Item = TokenKind;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1; // Clear the lowest set bit
        TokenKind::ALL.get(idx).copied()
    }
}

impl IntoIterator for ValidSymbols {
    type Item = TokenKind;
    type IntoIter = ValidSymbolsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<TokenKind> for ValidSymbols {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl fmt::Debug for ValidSymbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Human-readable list for diagnostics: "nothing", "`a`", "`a` or `b`",
/// "`a`, `b`, or `c`".
impl fmt::Display for ValidSymbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&'static str> = self.iter().map(TokenKind::name).collect();
        match names.as_slice() {
            [] => f.write_str("nothing"),
            [single] => write!(f, "`{single}`"),
            [first, second] => write!(f, "`{first}` or `{second}`"),
            [rest @ .., last] => {
                for name in rest {
                    write!(f, "`{name}`, ")?;
                }
                write!(f, "or `{last}`")
            }
        }
    }
}
