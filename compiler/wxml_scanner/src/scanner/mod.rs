//! The context-sensitive scanner.
//!
//! [`scan`] is a pure function of a [`Cursor`] and a [`ValidSymbols`] set.
//! It skips leading whitespace, then tries each acceptable kind in a fixed
//! priority order:
//!
//! 1. interpolation start `{{`
//! 2. interpolation end `}}`
//! 3. comment `<!-- ... -->`
//! 4. raw text (body of `<wxs>`)
//! 5. start or end tag name
//! 6. self-closing delimiter `/>`
//!
//! The first kind that matches wins. A kind that does not match consumes
//! nothing, so a failed invocation leaves the caller exactly where it was.

use tracing::trace;

use crate::cursor::Cursor;
use crate::reserved;
use crate::{Span, TokenKind, ValidSymbols};

/// Closing tag that ends a raw-text run, matched ignoring ASCII case.
pub const WXS_CLOSE_TAG: &[u8] = b"</wxs>";

const TAG_NAMES: ValidSymbols = ValidSymbols::new()
    .with(TokenKind::StartTagName)
    .with(TokenKind::EndTagName);

/// One token produced by [`scan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scanned {
    pub kind: TokenKind,
    /// Whitespace skipped before the token. Empty when none was skipped.
    pub trivia: Span,
    /// The token's own text.
    pub span: Span,
}

impl Scanned {
    /// Offset just past the token; where the grammar engine resumes.
    #[inline]
    pub fn end(&self) -> u32 {
        self.span.end
    }
}

/// First character of a tag name: alphabetic or `_`.
#[inline]
pub fn is_tag_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Tag name continuation: alphanumeric, `_`, `-`, or `:`.
#[inline]
pub fn is_tag_name_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':')
}

/// Try to produce exactly one token of a kind in `valid`.
///
/// Returns `None` when no acceptable kind matches. The caller's cursor is
/// never modified; on success it resumes at [`Scanned::end`].
#[tracing::instrument(level = "trace", skip_all, fields(pos = cursor.pos(), valid = %valid))]
pub fn scan(cursor: Cursor<'_>, valid: ValidSymbols) -> Option<Scanned> {
    if valid.is_empty() {
        return None;
    }

    let mut lexer = Lexer::new(cursor);
    lexer.skip_whitespace();

    if valid.contains(TokenKind::InterpolationStart) && lexer.eat(b"{{") {
        return Some(lexer.finish(TokenKind::InterpolationStart));
    }

    if valid.contains(TokenKind::InterpolationEnd) && lexer.eat(b"}}") {
        return Some(lexer.finish(TokenKind::InterpolationEnd));
    }

    if valid.contains(TokenKind::Comment) && lexer.comment() {
        return Some(lexer.finish(TokenKind::Comment));
    }

    if valid.contains(TokenKind::RawText) && lexer.raw_text() {
        return Some(lexer.finish(TokenKind::RawText));
    }

    if valid.intersects(TAG_NAMES) && lexer.tag_name() {
        let kind = if valid.contains(TokenKind::StartTagName) {
            TokenKind::StartTagName
        } else {
            TokenKind::EndTagName
        };
        return Some(lexer.finish(kind));
    }

    if valid.contains(TokenKind::SelfClosingTagDelimiter) && lexer.eat(b"/>") {
        return Some(lexer.finish(TokenKind::SelfClosingTagDelimiter));
    }

    trace!("no match");
    None
}

/// Per-invocation scan state. Dropped when [`scan`] returns.
struct Lexer<'a> {
    cursor: Cursor<'a>,
    /// Where the invocation started (start of trivia).
    trivia_start: u32,
    /// Where the token proper starts (after trivia).
    token_start: u32,
    /// Token boundary committed by [`mark_end`](Self::mark_end); defaults
    /// to the cursor position when unset.
    marked_end: Option<u32>,
}

impl<'a> Lexer<'a> {
    fn new(cursor: Cursor<'a>) -> Self {
        let pos = cursor.pos();
        Self {
            cursor,
            trivia_start: pos,
            token_start: pos,
            marked_end: None,
        }
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_chars_while(char::is_whitespace);
        self.token_start = self.cursor.pos();
    }

    /// Commit the token boundary at the current position.
    fn mark_end(&mut self) {
        self.marked_end = Some(self.cursor.pos());
    }

    /// Back to the post-trivia position, discarding any consumption.
    fn rewind(&mut self) {
        self.cursor = self.cursor.with_pos(self.token_start);
        self.marked_end = None;
    }

    fn finish(&self, kind: TokenKind) -> Scanned {
        let end = self.marked_end.unwrap_or(self.cursor.pos());
        let tok = Scanned {
            kind,
            trivia: Span::new(self.trivia_start, self.token_start),
            span: Span::new(self.token_start, end),
        };
        trace!(kind = kind.name(), span = %tok.span, "scanned");
        tok
    }

    /// Consume `lit` if the input starts with it.
    fn eat(&mut self, lit: &[u8]) -> bool {
        if self.cursor.starts_with(lit) {
            for _ in lit {
                self.cursor.advance();
            }
            true
        } else {
            false
        }
    }

    // ─── Comments ──────────────────────────────────────────────────

    /// `<!--` through the first `-->`. A lone `--` does not terminate.
    fn comment(&mut self) -> bool {
        if !self.eat(b"<!--") {
            return false;
        }
        if let Some(offset) = self.cursor.find(b"-->") {
            self.cursor.advance_n(offset + 3);
            true
        } else {
            self.rewind();
            false
        }
    }

    // ─── Raw Text ──────────────────────────────────────────────────

    /// Content up to `</wxs>` (any ASCII case) or EOF.
    ///
    /// Every `<` marks a candidate boundary; if the closing tag does not
    /// follow, the `<` is content and scanning resumes right after it.
    /// Empty content never matches.
    fn raw_text(&mut self) -> bool {
        loop {
            let Some(offset) = self.cursor.find_byte(b'<') else {
                self.cursor.seek_eof();
                self.mark_end();
                break;
            };
            self.cursor.advance_n(offset);
            self.mark_end();
            if self.cursor.starts_with_ignore_ascii_case(WXS_CLOSE_TAG) {
                break;
            }
            self.cursor.advance();
        }

        let has_content = self.marked_end.is_some_and(|end| end > self.token_start);
        if !has_content {
            self.rewind();
        }
        has_content
    }

    // ─── Tag Names ─────────────────────────────────────────────────

    /// `[alpha_][alnum_:-]*`, excluding reserved words.
    fn tag_name(&mut self) -> bool {
        if !self.cursor.current_char().is_some_and(is_tag_name_start) {
            return false;
        }
        self.cursor.eat_chars_while(is_tag_name_continue);

        let name = self.cursor.slice_from(self.token_start);
        if name.len() <= reserved::MAX_RESERVED_LEN && reserved::is_reserved(name) {
            trace!(name, "reserved word is not a tag name");
            self.rewind();
            return false;
        }
        true
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    reason = "test assertions use expect for clarity"
)]
