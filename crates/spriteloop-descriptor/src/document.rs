//! Descriptor document model and text writer.
//!
//! A [`Descriptor`] holds sectionless global entries followed by named
//! sections, each an ordered list of `key=value` entries. Duplicate keys are
//! kept; lookup returns the first occurrence, iteration yields all of them in
//! file order.

use std::fmt::Write as _;

/// One `key=value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named section and its ordered entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// An ordered descriptor document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    globals: Vec<Entry>,
    sections: Vec<Section>,
}

impl Descriptor {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// All global entries, in document order.
    pub fn globals(&self) -> &[Entry] {
        &self.globals
    }

    /// All sections, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a global value. Returns the first occurrence of `key`.
    pub fn global(&self, key: &str) -> Option<&str> {
        self.globals
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Read a global value as a legacy integer (missing key reads as 0).
    pub fn global_int(&self, key: &str) -> i32 {
        self.global(key).map(parse_legacy_int).unwrap_or(0)
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Look up a value inside a section. Returns the first occurrence of
    /// `key`; `None` if the section or key is absent.
    pub fn entry(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?
            .entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Read a section value as a legacy integer (missing section or key
    /// reads as 0).
    pub fn entry_int(&self, section: &str, key: &str) -> i32 {
        self.entry(section, key).map(parse_legacy_int).unwrap_or(0)
    }

    /// Iterate the entries of a section in document order.
    ///
    /// The iterator is restartable: calling this again walks the same
    /// entries from the beginning. An absent section yields nothing.
    pub fn entries(&self, section: &str) -> std::slice::Iter<'_, Entry> {
        self.section(section)
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
            .iter()
    }

    /// Set a global value, replacing the first existing occurrence of `key`
    /// or appending a new entry.
    pub fn set_global(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.globals.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => self.globals.push(Entry { key, value }),
        }
    }

    /// Append an entry to a section, creating the section if needed.
    pub fn push_entry(
        &mut self,
        section: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let entry = Entry::new(key, value);
        match self.sections.iter_mut().find(|s| s.name == section) {
            Some(s) => s.entries.push(entry),
            None => self.sections.push(Section {
                name: section.to_string(),
                entries: vec![entry],
            }),
        }
    }

    /// Render the document as descriptor text.
    ///
    /// Globals come first, one `key=value` per line, then each section as a
    /// `[name]` header followed by its entries, with one blank line between
    /// blocks. The output always ends in a newline and parses back to an
    /// equal document.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.globals {
            let _ = writeln!(out, "{}={}", entry.key, entry.value);
        }
        for section in &self.sections {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "[{}]", section.name);
            for entry in &section.entries {
                let _ = writeln!(out, "{}={}", entry.key, entry.value);
            }
        }
        out
    }

    pub(crate) fn push_global_entry(&mut self, entry: Entry) {
        self.globals.push(entry);
    }

    pub(crate) fn open_section(&mut self, name: &str) -> &mut Section {
        // Reopening an existing section appends to it.
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }
}

/// Parse an integer the way C `atoi` does: skip leading whitespace, accept
/// an optional sign, read the longest run of ASCII digits, and yield 0 when
/// no digits are present. Values outside the `i32` range saturate.
pub fn parse_legacy_int(raw: &str) -> i32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
