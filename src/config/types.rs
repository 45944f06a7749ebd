use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "targetDirs[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One numbered line per error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A module banner description in both table languages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleDescription {
    pub en: String,
    pub zh: String,
}

/// Settings for the scan and table tools, read from `.openclaw-i18n.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    /// Directories (relative to the workspace root) whose files are scanned.
    pub target_dirs: Vec<String>,
    pub exclude_patterns: Vec<String>,

    /// Literal texts that are never translated.
    pub ignored_strings: Vec<String>,

    /// Identifier of the translation call inserted by the scanner.
    pub translation_fn: String,

    /// Module that exports the translation function. Import specifiers are computed
    /// relative to its directory.
    pub i18n_module: String,
    pub locales_dir: String,

    /// Appends `as any` to rewritten calls in TypeScript files.
    pub cast_to_any: bool,

    /// Root of the files searched by `find-missing`.
    pub source_dir: String,

    /// Extra banner descriptions keyed by workspace-relative path, merged over the
    /// built-in ones.
    pub module_descriptions: BTreeMap<String, ModuleDescription>,
}

/// 識別子として有効か（JavaScript の ASCII 部分集合）
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl ToolSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Translation function is not an identifier
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.target_dirs.is_empty() {
            errors.push(ValidationError::new(
                "targetDirs",
                "At least one directory is required. Example: [\"src/cli\"]",
            ));
        }

        for (index, dir) in self.target_dirs.iter().enumerate() {
            if dir.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("targetDirs[{index}]"),
                    "The directory cannot be empty",
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if !is_identifier(&self.translation_fn) {
            errors.push(ValidationError::new(
                "translationFn",
                format!(
                    "'{}' is not a valid identifier. Example: \"t\"",
                    self.translation_fn
                ),
            ));
        }

        for (field, value) in [
            ("i18nModule", &self.i18n_module),
            ("localesDir", &self.locales_dir),
            ("sourceDir", &self.source_dir),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(field, "The path cannot be empty"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            target_dirs: ["src/wizard", "src/tui", "src/cli", "src/commands"]
                .map(String::from)
                .to_vec(),
            exclude_patterns: ["**/node_modules/**", "**/*.d.ts"].map(String::from).to_vec(),
            ignored_strings: ["", " ", "\n", "\t", "utf-8", "utf8", "global", "main"]
                .map(String::from)
                .to_vec(),
            translation_fn: "t".to_string(),
            i18n_module: "src/i18n/index.ts".to_string(),
            locales_dir: "src/i18n/locales".to_string(),
            cast_to_any: false,
            source_dir: "src".to_string(),
            module_descriptions: BTreeMap::new(),
        }
    }
}
