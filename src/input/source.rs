//! Source file input definitions.

use std::path::{
    Path,
    PathBuf,
};

/// A source file loaded for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the workspace root, with `/` separators.
    pub relative: String,
    pub text: String,
    pub language: ProgrammingLanguage,
}

impl SourceFile {
    /// Builds a source file, inferring the language from the extension.
    ///
    /// Returns `None` for extensions the scanner cannot parse.
    #[must_use]
    pub fn new(path: PathBuf, workspace_root: &Path, text: String) -> Option<Self> {
        let language = ProgrammingLanguage::from_path(&path)?;
        let relative = relative_display(&path, workspace_root);
        Some(Self { path, relative, text, language })
    }
}

/// `path` relative to `root` with forward slashes, or the full path when it is not
/// under `root`.
#[must_use]
pub fn relative_display(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Supported programming languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgrammingLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl ProgrammingLanguage {
    /// Infers the programming language from file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("tsx") => Some(Self::Tsx),
            Some("ts" | "mts" | "cts") => Some(Self::TypeScript),
            Some("jsx") => Some(Self::Jsx),
            Some("js" | "mjs" | "cjs") => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// TypeScript dialects accept `as` casts.
    #[must_use]
    pub const fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }

    #[must_use]
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Self::JavaScript | Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}
