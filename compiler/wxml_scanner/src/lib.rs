//! Context-sensitive tokenizer for WXML.
//!
//! The scanner is the leaf half of a lexer/grammar pair. A grammar engine
//! computes which token kinds are legal at its current parse state, hands
//! that [`ValidSymbols`] set to [`scan`] together with a [`Cursor`], and gets
//! back either exactly one [`Scanned`] token or `None`. On `None` the engine
//! falls back to its own literal rules.
//!
//! The scanner holds no state between calls. A [`Cursor`] is `Copy`, so an
//! engine that backtracks simply re-invokes [`scan`] with an earlier cursor
//! (see [`SourceBuffer::cursor_at`]).
//!
//! ```
//! use wxml_scanner::{scan, SourceBuffer, TokenKind, ValidSymbols};
//!
//! let buf = SourceBuffer::new("  {{ user.name }}");
//! let tok = scan(buf.cursor(), ValidSymbols::single(TokenKind::InterpolationStart))
//!     .expect("interpolation start");
//! assert_eq!(tok.kind, TokenKind::InterpolationStart);
//! assert_eq!((tok.trivia.len(), tok.span.start, tok.span.end), (2, 2, 4));
//! ```

mod cursor;
mod kind;
mod reserved;
mod scanner;
mod source_buffer;
mod span;
mod valid_symbols;

pub use cursor::Cursor;
pub use kind::{TokenKind, UnknownTokenKind};
pub use reserved::{is_reserved, lookup as lookup_reserved, ReservedWord, MAX_RESERVED_LEN};
pub use scanner::{is_tag_name_continue, is_tag_name_start, scan, Scanned, WXS_CLOSE_TAG};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use span::Span;
pub use valid_symbols::{ValidSymbols, ValidSymbolsIter};
