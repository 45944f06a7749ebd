//! Rebuilds a locale table whose entries were mangled by stray escapes or quotes.

use std::collections::{
    BTreeMap,
    HashSet,
};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::TableError;
use super::format::{
    format_entry,
    parse_entry_key,
    unescape,
};
use crate::i18n::Locale;

/// Upper bound on trimming passes in [`clean_corrupted`].
const MAX_CLEAN_PASSES: usize = 64;

/// Tolerant `"key": "value"` line pattern. The value runs to the last quote on the
/// line, so stray quotes inside it survive until [`clean_corrupted`] runs.
static CORRUPTED_ENTRY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"^"([\s\S]+?)":\s*"([\s\S]*?)",?$"#)
        .map_err(|e| tracing::error!("Failed to compile entry pattern: {e}"))
        .ok()
});

/// Leading junk: backslashes, quotes, colons, whitespace.
static LEADING_JUNK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^[\\":\s]+"#).ok());

/// Trailing junk: backslashes, colons, whitespace.
static TRAILING_JUNK: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[\\:\s]+$").ok());

/// Result of repairing one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    /// The rebuilt file text.
    pub text: String,
    /// Recovered `(key, value)` pairs, sorted by key.
    pub entries: BTreeMap<String, String>,
}

/// Undoes the `\\` and `\"` escapes a corrupted line may carry.
fn unescape_loose(raw: &str) -> String {
    raw.replace("\\\\", "\\").replace("\\\"", "\"")
}

/// Strips stray escape characters, quotes, colons and whitespace from both ends until
/// nothing changes, giving up after [`MAX_CLEAN_PASSES`] passes.
#[must_use]
pub fn clean_corrupted(text: &str) -> String {
    let (Some(leading), Some(trailing)) = (LEADING_JUNK.as_ref(), TRAILING_JUNK.as_ref()) else {
        return text.trim().to_string();
    };

    let mut current = text.trim().to_string();
    for _ in 0..MAX_CLEAN_PASSES {
        let stripped = leading.replace(&current, "");
        let stripped = trailing.replace(&stripped, "").into_owned();
        if stripped == current {
            break;
        }
        current = stripped;
    }
    current
}

/// Keys of the reference table, as written by the line extractor.
fn reference_keys(reference_text: &str) -> HashSet<String> {
    reference_text.lines().filter_map(parse_entry_key).map(unescape).collect()
}

/// Canonical file text for `locale` with `entries` in key order.
#[must_use]
pub fn render_canonical(locale: Locale, entries: &BTreeMap<String, String>) -> String {
    let name = locale.as_str();
    let mut output = String::from("import type { TranslationMap } from \"../types.js\";\n\n");
    output.push_str(&format!("const {name}: TranslationMap = {{\n"));
    for (key, value) in entries {
        output.push_str(&format_entry(key, value));
        output.push('\n');
    }
    output.push_str(&format!("}};\n\nexport default {name};\n"));
    output
}

/// Recovers what it can from `corrupted_text`, keeping only keys that the reference
/// table (normally `en_US`) defines.
///
/// Lines that do not look like entries are dropped. Entries whose value is empty or
/// equal to the key are dropped as untranslated. When a key occurs more than once the
/// last occurrence wins.
#[must_use]
pub fn repair(corrupted_text: &str, reference_text: &str, locale: Locale) -> RepairOutcome {
    let known_keys = reference_keys(reference_text);
    let mut entries = BTreeMap::new();

    let Some(pattern) = CORRUPTED_ENTRY.as_ref() else {
        return RepairOutcome { text: render_canonical(locale, &entries), entries };
    };

    for line in corrupted_text.lines() {
        let Some(caps) = pattern.captures(line.trim()) else {
            continue;
        };
        let (Some(raw_key), Some(raw_value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        let key = unescape_loose(raw_key.as_str()).replace("\\n", "\n");
        let key = TRAILING_JUNK
            .as_ref()
            .map_or_else(|| key.clone(), |trailing| trailing.replace(&key, "").into_owned());
        let value = clean_corrupted(&unescape_loose(raw_value.as_str()).replace("\\n", "\n"));

        if key.is_empty() || value.is_empty() || value == key {
            continue;
        }

        if known_keys.contains(&key) {
            entries.insert(key, value);
        } else {
            let cleaned = clean_corrupted(&key);
            if known_keys.contains(&cleaned) {
                entries.insert(cleaned, value);
            } else {
                tracing::debug!("Dropping entry with unknown key: {key}");
            }
        }
    }

    RepairOutcome { text: render_canonical(locale, &entries), entries }
}

/// Repairs the table at `table_path` in place against `reference_path`.
pub async fn repair_file(
    table_path: &Path,
    reference_path: &Path,
    locale: Locale,
) -> Result<RepairOutcome, TableError> {
    let corrupted = tokio::fs::read_to_string(table_path)
        .await
        .map_err(|source| TableError::Read { path: table_path.to_path_buf(), source })?;
    let reference = tokio::fs::read_to_string(reference_path)
        .await
        .map_err(|source| TableError::Read { path: reference_path.to_path_buf(), source })?;

    let outcome = repair(&corrupted, &reference, locale);

    tokio::fs::write(table_path, &outcome.text)
        .await
        .map_err(|source| TableError::Write { path: table_path.to_path_buf(), source })?;

    tracing::info!(
        "Cleaned up {}. Total keys: {}",
        table_path.display(),
        outcome.entries.len()
    );
    Ok(outcome)
}
