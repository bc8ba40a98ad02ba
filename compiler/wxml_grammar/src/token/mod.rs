//! Tokens produced by the grammar driver.

use std::fmt;

use wxml_scanner::{Span, TokenKind};

/// Kind of a token in the driver's output.
///
/// Covers the seven scanner kinds plus the literal and trivia tokens the
/// grammar matches on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // === Trivia ===
    /// Whitespace skipped between structural tokens.
    Whitespace,
    /// UTF-8 byte order mark at offset 0.
    Bom,

    // === Scanner tokens ===
    StartTagName,
    EndTagName,
    SelfClosingTagDelimiter,
    RawText,
    Comment,
    InterpolationStart,
    InterpolationEnd,

    // === Grammar literals ===
    /// `template`, `slot`, `block`, `import`, `include`, or `wxs` as an
    /// element name.
    ReservedTagName,
    /// `<`
    LessThan,
    /// `</`
    LessThanSlash,
    /// `>`
    GreaterThan,
    /// `=`
    Equals,
    /// `"` or `'` around an attribute value.
    Quote,
    AttributeName,
    /// Literal part of an attribute value (between quotes and
    /// interpolations, or an unquoted value).
    AttributeValue,
    /// Character data between elements.
    Text,
    /// Interior of `{{ ... }}`, not analysed further.
    Expression,

    /// Input the grammar could not place.
    Error,
}

impl SyntaxKind {
    /// Map a scanner token kind to its syntax kind.
    pub const fn from_scanned(kind: TokenKind) -> Self {
        match kind {
            TokenKind::StartTagName => SyntaxKind::StartTagName,
            TokenKind::EndTagName => SyntaxKind::EndTagName,
            TokenKind::SelfClosingTagDelimiter => SyntaxKind::SelfClosingTagDelimiter,
            TokenKind::RawText => SyntaxKind::RawText,
            TokenKind::Comment => SyntaxKind::Comment,
            TokenKind::InterpolationStart => SyntaxKind::InterpolationStart,
            TokenKind::InterpolationEnd => SyntaxKind::InterpolationEnd,
        }
    }

    /// Returns `true` for tokens that carry no structure.
    pub const fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Bom)
    }

    /// Returns `true` for tokens produced by the scanner.
    pub const fn is_scanned(self) -> bool {
        matches!(
            self,
            SyntaxKind::StartTagName
                | SyntaxKind::EndTagName
                | SyntaxKind::SelfClosingTagDelimiter
                | SyntaxKind::RawText
                | SyntaxKind::Comment
                | SyntaxKind::InterpolationStart
                | SyntaxKind::InterpolationEnd
        )
    }

    /// Snake-case name, matching the scanner's symbol names where shared.
    pub const fn name(self) -> &'static str {
        match self {
            SyntaxKind::Whitespace => "whitespace",
            SyntaxKind::Bom => "bom",
            SyntaxKind::StartTagName => "start_tag_name",
            SyntaxKind::EndTagName => "end_tag_name",
            SyntaxKind::SelfClosingTagDelimiter => "self_closing_tag_delimiter",
            SyntaxKind::RawText => "raw_text",
            SyntaxKind::Comment => "comment",
            SyntaxKind::InterpolationStart => "interpolation_start",
            SyntaxKind::InterpolationEnd => "interpolation_end",
            SyntaxKind::ReservedTagName => "reserved_tag_name",
            SyntaxKind::LessThan => "less_than",
            SyntaxKind::LessThanSlash => "less_than_slash",
            SyntaxKind::GreaterThan => "greater_than",
            SyntaxKind::Equals => "equals",
            SyntaxKind::Quote => "quote",
            SyntaxKind::AttributeName => "attribute_name",
            SyntaxKind::AttributeValue => "attribute_value",
            SyntaxKind::Text => "text",
            SyntaxKind::Expression => "expression",
            SyntaxKind::Error => "error",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified, non-empty span of the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: SyntaxKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Source text of this token.
    ///
    /// Returns an empty string if `source` is not the text this token was
    /// produced from.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.to_range()).unwrap_or_default()
    }
}

/// Ordered, contiguous list of tokens covering the whole source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token. Empty spans are dropped.
    pub fn push(&mut self, token: Token) {
        debug_assert!(
            self.tokens.last().map_or(0, |t| t.span.end) == token.span.start,
            "token {token:?} is not contiguous with its predecessor"
        );
        if !token.span.is_empty() {
            self.tokens.push(token);
        }
    }

    pub fn last_mut(&mut self) -> Option<&mut Token> {
        self.tokens.last_mut()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Kinds of all non-trivia tokens, in order.
    pub fn significant_kinds(&self) -> Vec<SyntaxKind> {
        self.tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
