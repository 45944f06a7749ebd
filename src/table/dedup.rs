//! Removes duplicate keys from a locale table file.

use std::collections::HashSet;
use std::path::Path;

use super::TableError;
use super::file::TableFile;
use super::format::parse_entry_key;

/// Result of deduplicating one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome {
    /// The rewritten file text.
    pub text: String,
    /// Number of distinct keys left in the table.
    pub kept: usize,
    /// Raw keys of the dropped entries, in the order they were dropped.
    pub removed: Vec<String>,
}

/// Drops every entry whose key already appeared earlier in the table.
///
/// The first occurrence wins, the order of surviving lines is unchanged, and lines
/// that are not entries (comments, blank lines) are kept. Header and footer are
/// copied verbatim.
#[must_use]
pub fn deduplicate(text: &str) -> DedupOutcome {
    let mut table = TableFile::parse(text);
    let mut seen: HashSet<String> = HashSet::new();
    let mut removed = Vec::new();

    table.entries.retain(|line| {
        let Some(key) = parse_entry_key(line) else {
            return true;
        };
        if seen.contains(key) {
            tracing::info!("Removing duplicate key: {key}");
            removed.push(key.to_string());
            return false;
        }
        seen.insert(key.to_string());
        true
    });

    DedupOutcome { text: table.render(), kept: seen.len(), removed }
}

/// Deduplicates the table at `path` in place.
///
/// The file is only rewritten when at least one duplicate was found.
pub async fn deduplicate_file(path: &Path) -> Result<DedupOutcome, TableError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TableError::Read { path: path.to_path_buf(), source })?;

    let outcome = deduplicate(&text);

    if !outcome.removed.is_empty() {
        tokio::fs::write(path, &outcome.text)
            .await
            .map_err(|source| TableError::Write { path: path.to_path_buf(), source })?;
    }

    tracing::info!("Deduplication complete. Kept {} unique keys.", outcome.kept);
    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    const WITH_DUPLICATES: &str = r#"import type { TranslationMap } from "../types.js";

const zh_CN: TranslationMap = {
  // Module: src/cli/a.ts
  "Hello": "你好",
  "Bye": "再见",
  "Hello": "哈喽",
  "Start": "开始",
  "Bye": "拜拜",
  "Hello": "您好",
};

export default zh_CN;
"#;

    #[rstest]
    fn keeps_first_occurrence() {
        let outcome = deduplicate(WITH_DUPLICATES);
        let table = TableFile::parse(&outcome.text);

        assert_eq!(
            table.pairs(),
            vec![
                ("Hello".to_string(), "你好".to_string()),
                ("Bye".to_string(), "再见".to_string()),
                ("Start".to_string(), "开始".to_string()),
            ]
        );
    }

    #[rstest]
    fn removed_count_is_total_minus_unique() {
        let outcome = deduplicate(WITH_DUPLICATES);
        let total = TableFile::parse(WITH_DUPLICATES).raw_keys().len();

        assert_that!(outcome.kept, eq(3));
        assert_that!(outcome.removed, elements_are![eq("Hello"), eq("Bye"), eq("Hello")]);
        assert_that!(outcome.removed.len(), eq(total - outcome.kept));
    }

    #[rstest]
    fn preserves_header_footer_and_comments() {
        let outcome = deduplicate(WITH_DUPLICATES);

        assert_that!(
            outcome.text,
            starts_with("import type { TranslationMap } from \"../types.js\";\n")
        );
        assert_that!(outcome.text, ends_with("};\n\nexport default zh_CN;\n"));
        assert_that!(outcome.text, contains_substring("  // Module: src/cli/a.ts\n"));
    }

    #[rstest]
    fn is_idempotent() {
        let once = deduplicate(WITH_DUPLICATES);
        let twice = deduplicate(&once.text);

        assert_that!(twice.text, eq(once.text.as_str()));
        assert_that!(twice.removed, is_empty());
    }

    #[tokio::test]
    async fn deduplicate_file_rewrites_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("zh_CN.ts");
        std::fs::write(&path, WITH_DUPLICATES).unwrap();

        let outcome = deduplicate_file(&path).await.unwrap();

        assert_that!(outcome.removed.len(), eq(3));
        assert_that!(std::fs::read_to_string(&path).unwrap(), eq(outcome.text.as_str()));
    }

    #[tokio::test]
    async fn deduplicate_file_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = deduplicate_file(&temp_dir.path().join("missing.ts")).await;

        assert!(matches!(result, Err(TableError::Read { .. })));
    }
}
