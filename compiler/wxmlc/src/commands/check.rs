//! `wxml check`: report structural errors.

use std::path::Path;
use std::process::ExitCode;

use wxml_grammar::parse;

use super::{line_col, read_file, CliError};

pub fn check_file(path: &Path) -> Result<ExitCode, CliError> {
    let content = read_file(path)?;
    let output = parse(&content);

    for err in &output.errors {
        let span = err.span();
        let (line, col) = line_col(&content, span.start);
        eprintln!("{}:{line}:{col}: error: {err} [{span}]", path.display());
    }

    if output.is_ok() {
        println!("{}: ok", path.display());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{}: {} error{}",
            path.display(),
            output.errors.len(),
            if output.errors.len() == 1 { "" } else { "s" }
        );
        Ok(ExitCode::FAILURE)
    }
}
