//! Structural errors found while driving the scanner.
//!
//! Parsing never stops at an error; each one is recorded with the span
//! it applies to and the token list still covers the whole input.

use thiserror::Error;
use wxml_scanner::Span;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a tag name after `<`")]
    ExpectedTagName { span: Span },

    #[error("unterminated comment: missing `-->`")]
    UnterminatedComment { span: Span },

    #[error("unterminated interpolation: missing `}}}}`")]
    UnterminatedInterpolation { span: Span },

    #[error("unterminated attribute value: missing closing quote")]
    UnterminatedAttributeValue { span: Span },

    #[error("start tag `<{name}` is not closed with `>` or `/>`")]
    UnterminatedStartTag { name: String, span: Span },

    #[error("unexpected character `{found}` in start tag")]
    UnexpectedCharacter { found: char, span: Span },

    #[error("expected an attribute value after `=`")]
    ExpectedAttributeValue { span: Span },

    #[error("element `<{name}>` is never closed")]
    UnclosedElement { name: String, span: Span },

    #[error("mismatched end tag: expected `</{expected}>`, found `</{found}>`")]
    MismatchedEndTag {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("end tag `</{name}>` has no matching start tag")]
    UnexpectedEndTag { name: String, span: Span },

    #[error("end tag is not closed with `>`")]
    UnterminatedEndTag { span: Span },

    #[error("NUL byte in source")]
    InteriorNull { span: Span },
}

impl ParseError {
    /// Source range the error applies to.
    pub fn span(&self) -> Span {
        match self {
            ParseError::ExpectedTagName { span }
            | ParseError::UnterminatedComment { span }
            | ParseError::UnterminatedInterpolation { span }
            | ParseError::UnterminatedAttributeValue { span }
            | ParseError::UnterminatedStartTag { span, .. }
            | ParseError::UnexpectedCharacter { span, .. }
            | ParseError::ExpectedAttributeValue { span }
            | ParseError::UnclosedElement { span, .. }
            | ParseError::MismatchedEndTag { span, .. }
            | ParseError::UnexpectedEndTag { span, .. }
            | ParseError::UnterminatedEndTag { span }
            | ParseError::InteriorNull { span } => *span,
        }
    }
}
