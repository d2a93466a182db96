//! Error types for descriptor reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or parsing a descriptor document.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The descriptor file could not be read.
    #[error("Failed to read descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line was neither a `key=value` entry, a `[section]` header, a
    /// comment, nor blank.
    #[error("Malformed descriptor line {line}: expected `key=value` or `[section]`")]
    Syntax { line: usize },
}
