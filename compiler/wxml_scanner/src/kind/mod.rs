//! The closed set of token kinds the scanner can produce.
//!
//! Discriminants are stable: they match the layout of the grammar engine's
//! valid-symbol array, and structural rules refer to the kinds by
//! [`name()`](TokenKind::name).

use std::fmt;
use std::str::FromStr;

/// Token kind produced by one scanner invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    /// Element name after `<`.
    StartTagName = 0,
    /// Element name after `</`.
    EndTagName = 1,
    /// `/>`.
    SelfClosingTagDelimiter = 2,
    /// Body of a `<wxs>` element, up to (not including) `</wxs>`.
    RawText = 3,
    /// `<!-- ... -->`, delimiters included.
    Comment = 4,
    /// `{{`.
    InterpolationStart = 5,
    /// `}}`.
    InterpolationEnd = 6,
}

const _: () = assert!(std::mem::size_of::<TokenKind>() == 1);

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = 7;

    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::StartTagName,
        TokenKind::EndTagName,
        TokenKind::SelfClosingTagDelimiter,
        TokenKind::RawText,
        TokenKind::Comment,
        TokenKind::InterpolationStart,
        TokenKind::InterpolationEnd,
    ];

    /// Discriminant as an index into the valid-symbol array.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`index()`](Self::index).
    pub const fn from_index(index: u8) -> Option<TokenKind> {
        match index {
            0 => Some(TokenKind::StartTagName),
            1 => Some(TokenKind::EndTagName),
            2 => Some(TokenKind::SelfClosingTagDelimiter),
            3 => Some(TokenKind::RawText),
            4 => Some(TokenKind::Comment),
            5 => Some(TokenKind::InterpolationStart),
            6 => Some(TokenKind::InterpolationEnd),
            _ => None,
        }
    }

    /// Stable symbol name used by grammar rules.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::StartTagName => "start_tag_name",
            TokenKind::EndTagName => "end_tag_name",
            TokenKind::SelfClosingTagDelimiter => "self_closing_tag_delimiter",
            TokenKind::RawText => "raw_text",
            TokenKind::Comment => "comment",
            TokenKind::InterpolationStart => "interpolation_start",
            TokenKind::InterpolationEnd => "interpolation_end",
        }
    }

    /// Fixed source text for fixed-width kinds, `None` for variable ones.
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            TokenKind::SelfClosingTagDelimiter => Some("/>"),
            TokenKind::InterpolationStart => Some("{{"),
            TokenKind::InterpolationEnd => Some("}}"),
            TokenKind::StartTagName
            | TokenKind::EndTagName
            | TokenKind::RawText
            | TokenKind::Comment => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown token kind name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown token kind `{0}`")]
pub struct UnknownTokenKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownTokenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownTokenKind(s.to_owned()))
    }
}
