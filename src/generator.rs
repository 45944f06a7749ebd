//! Locale table generator.
//!
//! Writes one table file per locale from a scan's [`ExtractionIndex`], grouped by
//! primary file, keeping translations that already exist in the old file.

/// Banner descriptions per module
mod descriptions;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::LazyLock;

pub use descriptions::ModuleDescriptions;
use regex::Regex;

use crate::config::ConfigManager;
use crate::i18n::Locale;
use crate::indexer::ExtractionIndex;
use crate::table::TableError;
use crate::table::format::{
    format_entry,
    unescape,
};

/// Horizontal rule used in banners.
const RULE: &str =
    "=====================================================================================";

/// Values carrying this prefix are placeholders and get regenerated.
const TODO_PREFIX: &str = "[TODO]";

/// Tolerant `"key": "value"` pattern for reading old tables.
static EXISTING_ENTRY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#""((?:\\.|[^"])*)":\s*"((?:\\.|[^"])*)""#)
        .map_err(|e| tracing::error!("Failed to compile entry pattern: {e}"))
        .ok()
});

/// Reads `"key": "value"` pairs out of an existing table, whatever shape the rest of
/// the file is in. Later duplicates win.
#[must_use]
pub fn existing_values(text: &str) -> HashMap<String, String> {
    let Some(pattern) = EXISTING_ENTRY.as_ref() else {
        return HashMap::new();
    };

    text.lines()
        .flat_map(|line| pattern.captures_iter(line))
        .filter_map(|captures| {
            let key = captures.get(1)?.as_str();
            let value = captures.get(2)?.as_str();
            Some((unescape(key), unescape(value)))
        })
        .collect()
}

/// Banner labels per locale: `(module, description)`.
const fn labels(locale: Locale) -> (&'static str, &'static str) {
    match locale {
        Locale::EnUs => ("Module", "Description"),
        Locale::ZhCn => ("模块", "功能"),
    }
}

/// Renders locale tables.
#[derive(Debug, Clone, Default)]
pub struct LocaleTableGenerator {
    /// Banner descriptions per module.
    descriptions: ModuleDescriptions,
}

impl LocaleTableGenerator {
    #[must_use]
    pub const fn new(descriptions: ModuleDescriptions) -> Self {
        Self { descriptions }
    }

    /// Value written for `key`: the old value unless it is missing, empty or a
    /// `[TODO]` placeholder.
    fn value_for(locale: Locale, key: &str, existing: &HashMap<String, String>) -> String {
        match existing.get(key) {
            Some(value) if !value.is_empty() && !value.starts_with(TODO_PREFIX) => value.clone(),
            _ if locale.is_default() => key.to_string(),
            _ => format!("{TODO_PREFIX} {key}"),
        }
    }

    /// Renders the full table file for `locale`.
    #[must_use]
    pub fn render(
        &self,
        locale: Locale,
        index: &ExtractionIndex,
        existing: &HashMap<String, String>,
    ) -> String {
        let (module_label, description_label) = labels(locale);

        let mut content = String::new();
        let _ = writeln!(content, "// {RULE}");
        let _ = writeln!(content, "// Auto-generated by openclaw-i18n scan");
        let _ = writeln!(content, "// {RULE}");
        content.push('\n');
        content.push_str("export default {\n");

        for (file, keys) in index.by_primary_file() {
            let _ = writeln!(content, "  // {RULE}");
            let _ = writeln!(content, "  // {module_label}: {file}");
            if let Some(description) = self.descriptions.describe(file, locale) {
                let _ = writeln!(content, "  // {description_label}: {description}");
            }
            let _ = writeln!(content, "  // {RULE}");

            for key in keys {
                let value = Self::value_for(locale, key, existing);
                content.push_str(&format_entry(key, &value));
                content.push('\n');
            }
            content.push('\n');
        }

        content.push_str("};\n");
        content
    }

    /// Regenerates the table at `path`, reading the old file first for existing values.
    ///
    /// # Errors
    /// Returns `TableError` if the old file exists but cannot be read, or the new one
    /// cannot be written.
    pub async fn write_table(
        &self,
        locale: Locale,
        index: &ExtractionIndex,
        path: &Path,
    ) -> Result<(), TableError> {
        let existing = match tokio::fs::read_to_string(path).await {
            Ok(text) => existing_values(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(TableError::Read { path: path.to_path_buf(), source }),
        };
        tracing::debug!("Loaded {} existing values from {}", existing.len(), path.display());

        let content = self.render(locale, index, &existing);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| TableError::Write { path: path.to_path_buf(), source })?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|source| TableError::Write { path: path.to_path_buf(), source })?;

        tracing::info!("Generated {}", path.display());
        Ok(())
    }

    /// Regenerates the tables of every locale at the configured location.
    ///
    /// # Errors
    /// Returns the first `TableError`; tables already written stay written.
    pub async fn write_all(
        &self,
        config: &ConfigManager,
        index: &ExtractionIndex,
    ) -> Result<Vec<PathBuf>, TableError> {
        let mut written = Vec::with_capacity(Locale::ALL.len());
        // zh_CN first, en_US last
        for locale in Locale::ALL.iter().rev() {
            let path = config.locale_table_path(*locale);
            self.write_table(*locale, index, &path).await?;
            written.push(path);
        }
        Ok(written)
    }
}
