//! Non-recursive grammar driver.
//!
//! One loop over the content state; start tags, end tags, attributes and
//! interpolations are sub-states entered from it. Nesting is tracked on an
//! explicit open-element stack, so deeply nested input never grows the call
//! stack.

use smallvec::SmallVec;
use tracing::debug;
use wxml_scanner::{
    is_tag_name_continue, is_tag_name_start, lookup_reserved, scan, Cursor, EncodingIssueKind,
    ReservedWord, Scanned, SourceBuffer, Span, TokenKind, ValidSymbols,
};

use crate::{ParseError, SyntaxKind, Token, TokenList};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Scanner kinds valid between elements.
const CONTENT: ValidSymbols = ValidSymbols::new()
    .with(TokenKind::InterpolationStart)
    .with(TokenKind::Comment);

const INTERPOLATION_START: ValidSymbols = ValidSymbols::single(TokenKind::InterpolationStart);
const INTERPOLATION_END: ValidSymbols = ValidSymbols::single(TokenKind::InterpolationEnd);
const SELF_CLOSING: ValidSymbols = ValidSymbols::single(TokenKind::SelfClosingTagDelimiter);
const RAW_TEXT: ValidSymbols = ValidSymbols::single(TokenKind::RawText);

/// Result of [`parse`]: the token list and every error found.
#[derive(Clone, Debug)]
pub struct ParseOutput<'src> {
    source: &'src str,
    pub tokens: TokenList,
    /// Sorted by start offset.
    pub errors: Vec<ParseError>,
}

impl<'src> ParseOutput<'src> {
    /// Returns `true` if no errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Source text of `token`.
    pub fn text(&self, token: &Token) -> &'src str {
        token.text(self.source)
    }

    pub fn source(&self) -> &'src str {
        self.source
    }
}

/// Tokenize and structurally check a WXML document.
///
/// Never fails: problems are collected in [`ParseOutput::errors`] and the
/// offending input is still covered by tokens.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> ParseOutput<'_> {
    let buffer = SourceBuffer::new(source);
    let mut parser = Parser::new(buffer.cursor());
    parser.run();

    let Parser {
        tokens, mut errors, ..
    } = parser;
    errors.extend(
        buffer
            .encoding_issues()
            .iter()
            .filter(|issue| issue.kind == EncodingIssueKind::InteriorNull)
            .map(|issue| ParseError::InteriorNull {
                span: Span::new(issue.pos, issue.pos + issue.len),
            }),
    );
    errors.sort_by_key(|err| err.span().start);

    debug!(tokens = tokens.len(), errors = errors.len(), "parsed");
    ParseOutput {
        source,
        tokens,
        errors,
    }
}

/// An element whose start tag has been seen but not its end tag.
#[derive(Clone, Copy, Debug)]
struct OpenElement<'a> {
    name: &'a str,
    /// From `<` through `>`.
    span: Span,
}

impl OpenElement<'_> {
    fn is_closed_by(self, end_name: &str) -> bool {
        if self.name == ReservedWord::Wxs.as_str() {
            end_name.eq_ignore_ascii_case(self.name)
        } else {
            self.name == end_name
        }
    }
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    tokens: TokenList,
    errors: Vec<ParseError>,
    open: SmallVec<[OpenElement<'a>; 16]>,
}

impl<'a> Parser<'a> {
    fn new(cursor: Cursor<'a>) -> Self {
        Parser {
            cursor,
            tokens: TokenList::new(),
            errors: Vec::new(),
            open: SmallVec::new(),
        }
    }

    fn run(&mut self) {
        if self.cursor.starts_with(UTF8_BOM) {
            self.bump(SyntaxKind::Bom, 3);
        }
        while !self.cursor.is_eof() {
            self.content();
        }
        while let Some(element) = self.open.pop() {
            self.error(ParseError::UnclosedElement {
                name: element.name.to_owned(),
                span: element.span,
            });
        }
    }

    // ─── Primitives ────────────────────────────────────────────────

    fn error(&mut self, err: ParseError) {
        debug!(error = %err, span = %err.span(), "parse error");
        self.errors.push(err);
    }

    /// Push a token spanning from the cursor to `end`, then move there.
    fn bump_to(&mut self, kind: SyntaxKind, end: u32) {
        let start = self.cursor.pos();
        self.cursor = self.cursor.with_pos(end);
        self.tokens.push(Token::new(kind, Span::new(start, end)));
    }

    fn bump(&mut self, kind: SyntaxKind, len: u32) {
        self.bump_to(kind, self.cursor.pos() + len);
    }

    fn whitespace(&mut self) {
        let mut probe = self.cursor;
        probe.eat_chars_while(char::is_whitespace);
        self.bump_to(SyntaxKind::Whitespace, probe.pos());
    }

    fn at(&self, byte: u8) -> bool {
        !self.cursor.is_eof() && self.cursor.current() == byte
    }

    /// Ask the scanner for one of `valid` and push what it produced.
    fn external(&mut self, valid: ValidSymbols) -> Option<Scanned> {
        let tok = scan(self.cursor, valid)?;
        self.tokens.push(Token::new(SyntaxKind::Whitespace, tok.trivia));
        self.tokens
            .push(Token::new(SyntaxKind::from_scanned(tok.kind), tok.span));
        self.cursor = self.cursor.with_pos(tok.end());
        Some(tok)
    }

    /// A start or end tag name: from the scanner, or a reserved element
    /// name the scanner declined.
    fn tag_name(&mut self, kind: TokenKind) -> Option<&'a str> {
        if let Some(tok) = self.external(ValidSymbols::single(kind)) {
            return Some(self.cursor.slice(tok.span.start, tok.span.end));
        }

        let mut probe = self.cursor;
        probe.eat_chars_while(char::is_whitespace);
        let start = probe.pos();
        if !probe.current_char().is_some_and(is_tag_name_start) {
            return None;
        }
        probe.eat_chars_while(is_tag_name_continue);
        let name = probe.slice_from(start);
        lookup_reserved(name)?;

        self.whitespace();
        self.bump_to(SyntaxKind::ReservedTagName, probe.pos());
        Some(name)
    }

    // ─── Content ───────────────────────────────────────────────────

    fn content(&mut self) {
        self.whitespace();
        if self.cursor.is_eof() {
            return;
        }

        match self.external(CONTENT) {
            Some(tok) if tok.kind == TokenKind::InterpolationStart => {
                self.interpolation(tok.span.start);
            }
            Some(_) => {}
            None if self.cursor.starts_with(b"</") => self.end_tag(),
            None if self.cursor.starts_with(b"<!--") => {
                let start = self.cursor.pos();
                self.bump_to(SyntaxKind::Error, self.cursor.source_len());
                self.error(ParseError::UnterminatedComment {
                    span: Span::new(start, self.cursor.pos()),
                });
            }
            None if self.at(b'<') => self.start_tag(),
            None => {
                let end = literal_run_end(self.cursor, b'<');
                self.bump_to(SyntaxKind::Text, end);
            }
        }
    }

    /// Body of `{{ ... }}`, starting after the opening delimiter.
    fn interpolation(&mut self, open: u32) {
        loop {
            if self.external(INTERPOLATION_END).is_some() {
                return;
            }
            if let Some(offset) = self.cursor.find(b"}}") {
                self.bump(SyntaxKind::Expression, offset);
            } else {
                self.bump_to(SyntaxKind::Expression, self.cursor.source_len());
                self.error(ParseError::UnterminatedInterpolation {
                    span: Span::new(open, self.cursor.pos()),
                });
                return;
            }
        }
    }

    // ─── Start Tags ────────────────────────────────────────────────

    fn start_tag(&mut self) {
        let start = self.cursor.pos();
        self.bump(SyntaxKind::LessThan, 1);

        let Some(name) = self.tag_name(TokenKind::StartTagName) else {
            if let Some(lt) = self.tokens.last_mut() {
                lt.kind = SyntaxKind::Text;
            }
            self.error(ParseError::ExpectedTagName {
                span: Span::new(start, start + 1),
            });
            return;
        };

        loop {
            if self.external(SELF_CLOSING).is_some() {
                return;
            }
            self.whitespace();
            match self.cursor.current_char() {
                Some('>') => {
                    self.bump(SyntaxKind::GreaterThan, 1);
                    break;
                }
                None | Some('<') => {
                    self.error(ParseError::UnterminatedStartTag {
                        name: name.to_owned(),
                        span: Span::new(start, self.cursor.pos()),
                    });
                    return;
                }
                Some(c) if is_attribute_name_char(c) => self.attribute(),
                Some(c) => {
                    let pos = self.cursor.pos();
                    let mut probe = self.cursor;
                    probe.advance_char();
                    self.bump_to(SyntaxKind::Error, probe.pos());
                    self.error(ParseError::UnexpectedCharacter {
                        found: c,
                        span: Span::new(pos, probe.pos()),
                    });
                }
            }
        }

        let span = Span::new(start, self.cursor.pos());
        if name == ReservedWord::Wxs.as_str() {
            self.external(RAW_TEXT);
        }
        self.open.push(OpenElement { name, span });
    }

    /// `name`, optionally followed by `= value`.
    fn attribute(&mut self) {
        let mut probe = self.cursor;
        probe.eat_chars_while(is_attribute_name_char);
        self.bump_to(SyntaxKind::AttributeName, probe.pos());

        probe.eat_chars_while(char::is_whitespace);
        if probe.is_eof() || probe.current() != b'=' {
            return;
        }
        self.whitespace();
        self.bump(SyntaxKind::Equals, 1);
        self.whitespace();

        match self.cursor.current_char() {
            Some('"') => self.quoted_value(b'"'),
            Some('\'') => self.quoted_value(b'\''),
            Some(c) if is_unquoted_value_char(c) => {
                let mut probe = self.cursor;
                probe.eat_chars_while(is_unquoted_value_char);
                self.bump_to(SyntaxKind::AttributeValue, probe.pos());
            }
            _ => self.error(ParseError::ExpectedAttributeValue {
                span: Span::point(self.cursor.pos()),
            }),
        }
    }

    /// Literal text and interpolations between matching quotes.
    fn quoted_value(&mut self, quote: u8) {
        let open = self.cursor.pos();
        self.bump(SyntaxKind::Quote, 1);

        loop {
            if self.cursor.is_eof() {
                self.error(ParseError::UnterminatedAttributeValue {
                    span: Span::new(open, self.cursor.pos()),
                });
                return;
            }
            if self.at(quote) {
                self.bump(SyntaxKind::Quote, 1);
                return;
            }
            if self.cursor.starts_with(b"{{") {
                if let Some(tok) = self.external(INTERPOLATION_START) {
                    self.interpolation(tok.span.start);
                    continue;
                }
            }
            let end = literal_run_end(self.cursor, quote);
            self.bump_to(SyntaxKind::AttributeValue, end);
        }
    }

    // ─── End Tags ──────────────────────────────────────────────────

    fn end_tag(&mut self) {
        let start = self.cursor.pos();
        self.bump(SyntaxKind::LessThanSlash, 2);

        let Some(name) = self.tag_name(TokenKind::EndTagName) else {
            self.error(ParseError::ExpectedTagName {
                span: Span::new(start, self.cursor.pos()),
            });
            return;
        };

        self.whitespace();
        if self.at(b'>') {
            self.bump(SyntaxKind::GreaterThan, 1);
        } else {
            self.error(ParseError::UnterminatedEndTag {
                span: Span::new(start, self.cursor.pos()),
            });
        }
        self.close_element(name, Span::new(start, self.cursor.pos()));
    }

    fn close_element(&mut self, name: &str, span: Span) {
        let Some(idx) = self.open.iter().rposition(|el| el.is_closed_by(name)) else {
            let err = match self.open.last() {
                Some(top) => ParseError::MismatchedEndTag {
                    expected: top.name.to_owned(),
                    found: name.to_owned(),
                    span,
                },
                None => ParseError::UnexpectedEndTag {
                    name: name.to_owned(),
                    span,
                },
            };
            self.error(err);
            return;
        };

        let unclosed: SmallVec<[OpenElement<'a>; 16]> = self.open.drain(idx + 1..).collect();
        self.open.pop();
        for element in unclosed {
            self.error(ParseError::UnclosedElement {
                name: element.name.to_owned(),
                span: element.span,
            });
        }
    }
}

fn is_attribute_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '=' | '{' | '}' | '\0')
}

fn is_unquoted_value_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '"' | '\'' | '<' | '>' | '=' | '`' | '\0')
}

/// End of a literal run starting at `probe`: the next `stop` byte, the next
/// `{{`, or EOF. Always covers at least one character.
fn literal_run_end(mut probe: Cursor<'_>, stop: u8) -> u32 {
    probe.advance_char();
    while let Some(offset) = probe.find_either(stop, b'{') {
        probe.advance_n(offset);
        if probe.current() == stop || probe.starts_with(b"{{") {
            return probe.pos();
        }
        probe.advance();
    }
    probe.source_len()
}

#[cfg(test)]
mod tests;
