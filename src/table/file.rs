//! Splits a locale table source file into header, entry lines, and footer.

use super::format::{
    parse_entry,
    parse_entry_key,
};

/// Where the boundary scanner currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Up to and including the object start line.
    Header,
    /// Inside the object literal.
    Object,
    /// From the closing `};` on.
    Footer,
}

/// A locale table file, split at the object literal boundaries.
///
/// The header ends with the line that opens the object (`export default {` or
/// `const zh_CN: TranslationMap = {`); the footer starts with the `};` line that
/// closes it. Everything in between is kept line by line, including comments and
/// lines that are not entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFile {
    pub header: Vec<String>,
    pub entries: Vec<String>,
    pub footer: Vec<String>,
}

/// Returns true for the line that opens the table object literal.
fn is_object_start(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == "export default {" || (trimmed.ends_with("= {") && !trimmed.starts_with("//"))
}

/// Returns true for the line that closes the table object literal.
fn is_object_end(line: &str) -> bool {
    line.trim_start().starts_with("};")
}

impl TableFile {
    /// Splits `text` into sections. Never fails: a file without an object start is
    /// all header.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut file = Self::default();
        let mut section = Section::Header;

        for line in text.split('\n') {
            match section {
                Section::Header => {
                    file.header.push(line.to_string());
                    if is_object_start(line) {
                        section = Section::Object;
                    }
                }
                Section::Object => {
                    if is_object_end(line) {
                        file.footer.push(line.to_string());
                        section = Section::Footer;
                    } else {
                        file.entries.push(line.to_string());
                    }
                }
                Section::Footer => file.footer.push(line.to_string()),
            }
        }

        file
    }

    /// Joins the sections back together. `TableFile::parse(t).render() == t`.
    #[must_use]
    pub fn render(&self) -> String {
        self.header
            .iter()
            .chain(&self.entries)
            .chain(&self.footer)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Raw (still escaped) keys of all entry lines, in file order, duplicates included.
    #[must_use]
    pub fn raw_keys(&self) -> Vec<&str> {
        self.entries.iter().filter_map(|line| parse_entry_key(line)).collect()
    }

    /// Decoded `(key, value)` pairs of all well-formed entry lines, in file order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.entries.iter().filter_map(|line| parse_entry(line)).map(|e| e.decode()).collect()
    }
}
