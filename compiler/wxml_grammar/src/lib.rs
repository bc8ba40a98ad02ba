//! Reference structural grammar for WXML.
//!
//! Drives [`wxml_scanner::scan`] the way an incremental parsing engine does:
//! at each parse state it asks the scanner for the context-sensitive tokens
//! legal there, and falls back to its own literal rules (`<`, `</`, `>`,
//! attribute names and values, text, reserved element names) when the
//! scanner reports no match.
//!
//! The output is a flat, lossless [`TokenList`]: every byte of the input
//! belongs to exactly one token, trivia included.

mod error;
mod parser;
mod token;

pub use error::ParseError;
pub use parser::{parse, ParseOutput};
pub use token::{SyntaxKind, Token, TokenList};
pub use wxml_scanner::Span;
