//! Descriptor text parsing.

use std::path::Path;

use crate::document::{Descriptor, Entry};
use crate::error::DescriptorError;

impl Descriptor {
    /// Parse descriptor text.
    ///
    /// Lines are trimmed before interpretation. Blank lines and lines
    /// starting with `#` or `;` are skipped. `[name]` opens a section
    /// (reopening a name appends to the earlier section); `key=value` adds
    /// an entry to the current section, or to the globals when no section
    /// has been opened yet. Anything else is a syntax error carrying the
    /// 1-based line number.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let mut doc = Descriptor::new();
        let mut current: Option<String> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let lineno = idx + 1;

            if let Some(rest) = line.strip_prefix('[') {
                let (name, tail) = rest
                    .split_once(']')
                    .ok_or(DescriptorError::Syntax { line: lineno })?;
                let name = name.trim();
                if name.is_empty() || !tail.trim().is_empty() {
                    return Err(DescriptorError::Syntax { line: lineno });
                }
                doc.open_section(name);
                current = Some(name.to_string());
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or(DescriptorError::Syntax { line: lineno })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(DescriptorError::Syntax { line: lineno });
            }
            let entry = Entry::new(key, value.trim());

            match &current {
                Some(name) => doc.open_section(name).entries.push(entry),
                None => doc.push_global_entry(entry),
            }
        }

        Ok(doc)
    }

    /// Read and parse a descriptor file.
    pub fn from_path(path: &Path) -> Result<Self, DescriptorError> {
        let text = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}
