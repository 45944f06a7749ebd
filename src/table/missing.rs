//! Reports translation keys that source code uses but a locale table lacks.

use std::collections::{
    BTreeSet,
    HashSet,
};
use std::path::Path;

use regex::Regex;

use super::TableError;
use super::format::{
    format_entry,
    parse_entry_key,
    unescape,
};
use crate::config::FileMatcher;
use crate::indexer::find_source_files;

/// Finds `t("...")` / `t('...')` call sites with a plain regex, independently of the
/// tree-sitter scanner.
#[derive(Debug, Clone)]
pub struct KeyReferenceScanner {
    /// `fn("...")` / `fn('...')` with the key in group 1 or 2.
    pattern: Regex,
}

impl KeyReferenceScanner {
    /// Builds a scanner for calls to `translation_fn`.
    ///
    /// # Errors
    /// Fails only if the escaped function name somehow yields an invalid pattern.
    pub fn new(translation_fn: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"\b{}\s*\(\s*(?:"((?:[^"\\\n]|\\.)*)"|'((?:[^'\\\n]|\\.)*)')\s*[,)]"#,
            regex::escape(translation_fn)
        ))?;
        Ok(Self { pattern })
    }

    /// Returns the unescaped keys referenced in `source`, in order of appearance.
    #[must_use]
    pub fn referenced_keys(&self, source: &str) -> Vec<String> {
        self.pattern
            .captures_iter(source)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| unescape(m.as_str()))
            .collect()
    }
}

/// Keys defined in a table, found line by line with the quoted-key pattern.
#[must_use]
pub fn defined_keys(table_text: &str) -> HashSet<String> {
    table_text.lines().filter_map(parse_entry_key).map(unescape).collect()
}

/// Outcome of comparing a table against the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingReport {
    /// Number of distinct keys the table defines.
    pub defined: usize,
    /// Every distinct key referenced by source code.
    pub referenced: BTreeSet<String>,
    /// Referenced keys absent from the table, sorted.
    pub missing: BTreeSet<String>,
}

impl MissingReport {
    /// Ready-to-paste table lines for the missing keys (value = key).
    #[must_use]
    pub fn entry_lines(&self) -> Vec<String> {
        self.missing.iter().map(|key| format_entry(key, key)).collect()
    }
}

/// Compares the keys of `table_text` with the keys referenced by `sources`.
pub fn find_missing<'a>(
    table_text: &str,
    sources: impl IntoIterator<Item = &'a str>,
    scanner: &KeyReferenceScanner,
) -> MissingReport {
    let defined = defined_keys(table_text);
    let referenced: BTreeSet<String> =
        sources.into_iter().flat_map(|source| scanner.referenced_keys(source)).collect();
    let missing = referenced.iter().filter(|key| !defined.contains(*key)).cloned().collect();

    MissingReport { defined: defined.len(), referenced, missing }
}

/// Reads the table at `table_path` and every reference source under the workspace,
/// then reports the missing keys. Source files that cannot be read are skipped.
pub async fn find_missing_in_workspace(
    table_path: &Path,
    matcher: &FileMatcher,
    scanner: &KeyReferenceScanner,
) -> Result<MissingReport, TableError> {
    let table_text = tokio::fs::read_to_string(table_path)
        .await
        .map_err(|source| TableError::Read { path: table_path.to_path_buf(), source })?;

    let files = find_source_files(matcher.workspace_root(), |relative| {
        matcher.is_reference_source_relative(relative)
    });

    let mut sources = Vec::with_capacity(files.len());
    for file in &files {
        match tokio::fs::read_to_string(file).await {
            Ok(content) => sources.push(content),
            Err(e) => tracing::warn!("Failed to read file {:?}: {}", file, e),
        }
    }

    let report = find_missing(&table_text, sources.iter().map(String::as_str), scanner);

    tracing::info!("Found {} defined keys in {}", report.defined, table_path.display());
    tracing::info!("Found {} unique keys in source code.", report.referenced.len());
    tracing::info!("Missing {} keys in {}.", report.missing.len(), table_path.display());

    Ok(report)
}
