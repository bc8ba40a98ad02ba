//! `wxml scan`: one scanner invocation at an arbitrary offset.

use std::path::Path;
use std::process::ExitCode;

use wxml_scanner::{scan, SourceBuffer, TokenKind, UnknownTokenKind, ValidSymbols};

use super::{read_file, CliError};

pub fn scan_file(path: &Path, offset: u32, kinds: &[String]) -> Result<ExitCode, CliError> {
    let content = read_file(path)?;
    let valid = parse_valid(kinds)?;
    check_offset(&content, offset)?;

    let buf = SourceBuffer::new(&content);
    match scan(buf.cursor_at(offset), valid) {
        Some(tok) => {
            let text = content.get(tok.span.to_range()).unwrap_or_default();
            println!("{} @ {} {text:?}", tok.kind, tok.span);
            if !tok.trivia.is_empty() {
                println!("  trivia @ {}", tok.trivia);
            }
        }
        None => println!("no match for {valid} at {offset}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_valid(kinds: &[String]) -> Result<ValidSymbols, UnknownTokenKind> {
    kinds
        .iter()
        .map(|kind| kind.trim().parse::<TokenKind>())
        .collect()
}

fn check_offset(content: &str, offset: u32) -> Result<(), CliError> {
    let idx = offset as usize;
    if idx > content.len() {
        return Err(CliError::OffsetOutOfRange {
            offset,
            len: content.len(),
        });
    }
    if !content.is_char_boundary(idx) {
        return Err(CliError::NotCharBoundary { offset });
    }
    Ok(())
}
