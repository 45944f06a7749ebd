//! File pattern matcher for scan targets and reference sources.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::ToolSettings;

/// Extensions the scanner can parse.
const SOURCE_EXTENSIONS_GLOB: &str = "**/*.{ts,tsx,js,jsx}";

/// Files never searched for key references.
const REFERENCE_EXCLUDES: [&str; 2] = ["**/*.d.ts", "**/*.test.ts"];

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid target directory '{pattern}': {source}")]
    InvalidTargetDir {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid source directory '{pattern}': {source}")]
    InvalidSourceDir {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against the configured directories and glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Root that relative paths are resolved against.
    workspace_root: PathBuf,
    /// `targetDirs` as `dir/**` globs.
    target_set: GlobSet,
    /// Parseable source extensions.
    source_extension_set: GlobSet,
    /// `excludePatterns`.
    exclude_set: GlobSet,
    /// `.ts` files under `sourceDir`.
    reference_set: GlobSet,
    /// Declaration and test files.
    reference_exclude_set: GlobSet,
}

/// `src/cli/` → `src/cli/**`
fn directory_glob(dir: &str, suffix: &str) -> String {
    format!("{}/{suffix}", dir.trim().trim_end_matches('/'))
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    ///
    /// # Errors
    /// Returns `MatcherError` when a directory or pattern is not a valid glob.
    pub fn new(workspace_root: PathBuf, settings: &ToolSettings) -> Result<Self, MatcherError> {
        let target_patterns: Vec<String> =
            settings.target_dirs.iter().map(|dir| directory_glob(dir, "**")).collect();
        let target_set = Self::build_glob_set(&target_patterns, |pattern, source| {
            MatcherError::InvalidTargetDir { pattern, source }
        })?;

        let source_extension_set =
            Self::build_glob_set(&[SOURCE_EXTENSIONS_GLOB.to_string()], |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        let reference_set =
            Self::build_glob_set(&[directory_glob(&settings.source_dir, "**/*.ts")], |pattern, source| {
                MatcherError::InvalidSourceDir { pattern, source }
            })?;

        let reference_excludes: Vec<String> =
            REFERENCE_EXCLUDES.iter().map(ToString::to_string).collect();
        let reference_exclude_set = Self::build_glob_set(&reference_excludes, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self {
            workspace_root,
            target_set,
            source_extension_set,
            exclude_set,
            reference_set,
            reference_exclude_set,
        })
    }

    /// Compiles `patterns`, reporting the first invalid one through `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the path lies under a target directory, has a parseable
    /// extension, and matches no `excludePatterns`.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_scan_target(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.workspace_root).ok() else {
            return false;
        };

        self.is_scan_target_relative(relative_path)
    }

    /// Same as [`Self::is_scan_target`] for a path relative to the workspace root.
    #[must_use]
    pub fn is_scan_target_relative(&self, relative_path: &Path) -> bool {
        self.target_set.is_match(relative_path)
            && self.source_extension_set.is_match(relative_path)
            && !self.exclude_set.is_match(relative_path)
    }

    /// Returns true for `.ts` files under `sourceDir` that are neither declaration
    /// files nor tests, and match no `excludePatterns`.
    ///
    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn is_reference_source_relative(&self, relative_path: &Path) -> bool {
        self.reference_set.is_match(relative_path)
            && !self.reference_exclude_set.is_match(relative_path)
            && !self.exclude_set.is_match(relative_path)
    }
}
