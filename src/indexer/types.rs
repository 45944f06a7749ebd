//! Indexer type definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{
    ConfigError,
    MatcherError,
};
use crate::syntax::AnalyzerError;
use crate::table::TableError;

/// Keys discovered by a scan, each with the files it was found in.
///
/// Files are kept in the order they were first observed; the first one is the key's
/// primary file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionIndex {
    /// key → files in observation order
    keys: BTreeMap<String, Vec<String>>,
}

impl ExtractionIndex {
    #[must_use]
    pub const fn new() -> Self {
        Self { keys: BTreeMap::new() }
    }

    /// Records that `key` occurs in `file`. Repeated files are ignored.
    pub fn record(&mut self, key: impl Into<String>, file: &str) {
        let files = self.keys.entry(key.into()).or_default();
        if !files.iter().any(|known| known == file) {
            files.push(file.to_string());
        }
    }

    #[must_use]
    pub fn files(&self, key: &str) -> Option<&[String]> {
        self.keys.get(key).map(Vec::as_slice)
    }

    /// The first file `key` was observed in.
    #[must_use]
    pub fn primary_file(&self, key: &str) -> Option<&str> {
        self.keys.get(key).and_then(|files| files.first()).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Groups keys by primary file. Both files and keys come out sorted.
    #[must_use]
    pub fn by_primary_file(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, files) in &self.keys {
            if let Some(primary) = files.first() {
                groups.entry(primary.as_str()).or_default().push(key.as_str());
            }
        }
        groups
    }
}

/// Summary of one scan run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub files_scanned: usize,
    /// Files that were (or, in a dry run, would be) rewritten.
    pub files_updated: Vec<String>,
    /// Files skipped because they could not be read or parsed.
    pub files_failed: Vec<String>,
    pub literals_rewritten: usize,
    pub keys_extracted: usize,
    /// Locale tables written by the generator.
    pub tables_written: Vec<PathBuf>,
}

impl ScanReport {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.files_failed.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum IndexerError {
    /// Error when failing to read or write a source file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Error when a source file cannot be parsed
    #[error("Failed to analyze {}: {source}", path.display())]
    Analysis {
        path: PathBuf,
        #[source]
        source: AnalyzerError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Matcher(#[from] MatcherError),
    /// Error from the locale table generator
    #[error(transparent)]
    Table(#[from] TableError),
}
