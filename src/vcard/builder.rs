//! Ordered property list and the finished document.
//!
//! Properties are pushed in output order as optional values; absent values
//! are dropped when the list is turned into lines, so a property is either a
//! complete line or not there at all.

use super::escape::escape_text;
use crate::profile::present;

pub const BEGIN: &str = "BEGIN:VCARD";
pub const VERSION: &str = "VERSION:3.0";
pub const END: &str = "END:VCARD";
pub const LINE_TERMINATOR: &str = "\r\n";

/// One content line: `name` (with parameters) and its encoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Property {
    name: String,
    value: Option<String>,
}

/// Ordered list of optional properties.
#[derive(Debug, Default)]
pub struct PropertyList {
    entries: Vec<Property>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Property that is emitted even when the value is empty.
    pub fn always(self, name: impl Into<String>, encoded: String) -> Self {
        self.push(name, Some(encoded))
    }

    /// Free-text property, emitted only when `value` is non-blank.
    pub fn text(self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.push(name, present(value).map(escape_text))
    }

    /// Structured property: the escaped value is placed into `template`.
    pub fn structured<F>(self, name: impl Into<String>, value: Option<&str>, template: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        let encoded = present(value).map(|v| template(&escape_text(v)));
        self.push(name, encoded)
    }

    /// Already-encoded optional value (base64 payloads, constant labels).
    pub fn encoded(self, name: impl Into<String>, encoded: Option<String>) -> Self {
        self.push(name, encoded.filter(|v| !v.is_empty()))
    }

    /// Names of properties that will be emitted.
    pub fn emitted_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|p| p.value.is_some())
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.entries
            .into_iter()
            .filter_map(|p| p.value.map(|v| format!("{}:{}", p.name, v)))
            .collect()
    }

    fn push(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.entries.push(Property {
            name: name.into(),
            value,
        });
        self
    }
}

/// A finished vCard: header, content lines, footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardDocument {
    lines: Vec<String>,
}

impl VCardDocument {
    pub fn from_properties(properties: PropertyList) -> Self {
        let mut lines = Vec::with_capacity(properties.entries.len() + 3);
        lines.push(BEGIN.to_string());
        lines.push(VERSION.to_string());
        lines.extend(properties.into_lines());
        lines.push(END.to_string());
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First line whose property name (before parameters) equals `name`.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| property_name(line) == name)
            .map(String::as_str)
    }

    /// Number of lines carrying property `name`.
    pub fn count(&self, name: &str) -> usize {
        self.lines
            .iter()
            .filter(|line| property_name(line) == name)
            .count()
    }

    /// Serialized text, lines joined with CRLF.
    pub fn to_text(&self) -> String {
        self.lines.join(LINE_TERMINATOR)
    }
}

fn property_name(line: &str) -> &str {
    let end = line
        .find(|c: char| c == ':' || c == ';')
        .unwrap_or(line.len());
    &line[..end]
}
