//! WXML tokenizer CLI
//!
//! Thin front end over `wxml_scanner` and `wxml_grammar` for inspecting how
//! a document tokenizes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser)]
#[command(name = "wxml", version)]
#[command(about = "Tokenize and check WXML documents")]
struct Cli {
    /// Log filter directives, e.g. `wxml_scanner=trace`. Overrides `RUST_LOG`.
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every token of a document.
    Lex {
        file: PathBuf,
        /// Emit a JSON array of `{kind, start, end, text}` objects.
        #[arg(long)]
        json: bool,
    },
    /// Report structural errors. Exits with status 1 if there are any.
    Check { file: PathBuf },
    /// Run a single scanner invocation.
    Scan {
        file: PathBuf,
        /// Byte offset to scan from.
        #[arg(long, value_name = "OFFSET")]
        at: u32,
        /// Comma-separated token kinds valid at the offset.
        #[arg(long, value_name = "KIND,...", value_delimiter = ',', required = true)]
        valid: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_setup::init_tracing(cli.log.as_deref());

    let result = match &cli.command {
        Command::Lex { file, json } => commands::lex_file(file, *json),
        Command::Check { file } => commands::check_file(file),
        Command::Scan { file, at, valid } => commands::scan_file(file, *at, valid),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
