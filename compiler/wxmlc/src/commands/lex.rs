//! `wxml lex`: dump the token list.

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use wxml_grammar::{parse, ParseOutput};

use super::{read_file, CliError};

#[derive(Serialize)]
struct JsonToken<'a> {
    kind: &'static str,
    start: u32,
    end: u32,
    text: &'a str,
}

pub fn lex_file(path: &Path, json: bool) -> Result<ExitCode, CliError> {
    let content = read_file(path)?;
    let output = parse(&content);

    if json {
        println!("{}", to_json(&output)?);
    } else {
        println!(
            "Tokens for '{}' ({} tokens):",
            path.display(),
            output.tokens.len()
        );
        for tok in &output.tokens {
            println!("  {} @ {} {:?}", tok.kind, tok.span, output.text(tok));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn to_json(output: &ParseOutput<'_>) -> Result<String, serde_json::Error> {
    let tokens: Vec<JsonToken<'_>> = output
        .tokens
        .iter()
        .map(|tok| JsonToken {
            kind: tok.kind.name(),
            start: tok.span.start,
            end: tok.span.end,
            text: output.text(tok),
        })
        .collect();
    serde_json::to_string_pretty(&tokens)
}
