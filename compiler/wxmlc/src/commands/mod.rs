//! Command handlers for the `wxml` CLI.
//!
//! Each submodule implements one subcommand. Shared utilities like
//! `read_file` live here in the module root.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use wxml_scanner::UnknownTokenKind;

mod check;
mod lex;
mod scan;

pub use check::check_file;
pub use lex::lex_file;
pub use scan::scan_file;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot find file '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading '{}'", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("'{}' contains invalid UTF-8 data", .path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("offset {offset} is past the end of the input ({len} bytes)")]
    OffsetOutOfRange { offset: u32, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: u32 },

    #[error(transparent)]
    UnknownKind(#[from] UnknownTokenKind),

    #[error("cannot serialize tokens: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => CliError::NotFound { path },
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io { path, source },
        }
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read source");
    Ok(content)
}

/// 1-based line and column (in characters) of a byte offset.
pub(crate) fn line_col(source: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line = before.matches('\n').count() + 1;
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
