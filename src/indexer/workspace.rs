//! Workspace scanner: rewrites target files and collects translation keys.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    ConfigManager,
    FileMatcher,
};
use crate::generator::{
    LocaleTableGenerator,
    ModuleDescriptions,
};
use crate::indexer::types::{
    ExtractionIndex,
    IndexerError,
    ScanReport,
};
use crate::input::source::{
    SourceFile,
    relative_display,
};
use crate::syntax::analyzer::rewriter::relative_import_specifier;
use crate::syntax::{
    ClassifyOptions,
    RewriteOptions,
    transform_source,
};

/// Finds files under `workspace_path` whose workspace-relative path satisfies
/// `include`, honoring `.gitignore`. The result is sorted.
#[must_use]
pub fn find_source_files(workspace_path: &Path, include: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut found_files = Vec::new();

    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(workspace_path)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();

        // workspace からの相対パスを取得
        let Ok(relative_path) = path.strip_prefix(workspace_path) else {
            continue;
        };
        if !include(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    found_files
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    /// Nothing to replace.
    Unchanged,
    /// Rewritten (or would be, in a dry run) with this many replacements.
    Updated(usize),
}

/// Scans the configured target directories, rewrites user-facing literals and
/// regenerates the locale tables.
#[derive(Debug)]
pub struct WorkspaceScanner {
    /// Loaded configuration
    config: ConfigManager,
    /// Compiled target and exclude patterns
    matcher: FileMatcher,
    /// Classification inputs
    classify_options: ClassifyOptions,
    /// Code generation inputs
    rewrite_options: RewriteOptions,
    /// Report only; touch no files
    dry_run: bool,
}

impl WorkspaceScanner {
    /// Creates a scanner from loaded settings.
    ///
    /// # Errors
    /// Returns `IndexerError::Matcher` when the configured patterns are invalid.
    pub fn new(config: ConfigManager) -> Result<Self, IndexerError> {
        let matcher = config.file_matcher()?;
        let settings = config.get_settings();
        let classify_options = ClassifyOptions::from_settings(settings);
        let rewrite_options = RewriteOptions::from_settings(settings);

        Ok(Self { config, matcher, classify_options, rewrite_options, dry_run: false })
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Files the scan visits, in processing order.
    #[must_use]
    pub fn target_files(&self) -> Vec<PathBuf> {
        find_source_files(self.config.workspace_root(), |relative| {
            self.matcher.is_scan_target_relative(relative)
        })
    }

    /// Import specifier for the i18n module as seen from `file`.
    fn import_specifier_for(&self, file: &SourceFile) -> String {
        let from_dir = Path::new(&file.relative).parent().unwrap_or_else(|| Path::new(""));
        relative_import_specifier(from_dir, Path::new(&self.config.get_settings().i18n_module))
    }

    /// Scans every target file, one at a time in path order, without generating tables.
    ///
    /// Files that cannot be read, parsed or saved are logged, listed in the report and
    /// skipped.
    pub async fn scan(&self) -> (ExtractionIndex, ScanReport) {
        let workspace_root = self.config.workspace_root();
        tracing::debug!(workspace_path = %workspace_root.display(), "Scanning workspace");

        let files = self.target_files();
        tracing::info!("Found {} files to scan", files.len());

        let mut index = ExtractionIndex::new();
        let mut report = ScanReport::default();

        for path in files {
            report.files_scanned += 1;
            let relative = relative_display(&path, workspace_root);

            match self.scan_file(&path, &mut index).await {
                Ok(FileOutcome::Updated(count)) => {
                    report.literals_rewritten += count;
                    report.files_updated.push(relative);
                }
                Ok(FileOutcome::Unchanged) => {}
                Err(e) => {
                    // 処理できないファイルはスキップして続行
                    tracing::error!("Error processing file {relative}: {e}");
                    report.files_failed.push(relative);
                }
            }
        }

        report.keys_extracted = index.len();
        (index, report)
    }

    /// Analyzes one file, records its keys and saves the rewrite.
    async fn scan_file(
        &self,
        path: &Path,
        index: &mut ExtractionIndex,
    ) -> Result<FileOutcome, IndexerError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IndexerError::Io { path: path.to_path_buf(), source })?;

        let Some(file) =
            SourceFile::new(path.to_path_buf(), self.config.workspace_root(), content)
        else {
            return Ok(FileOutcome::Unchanged);
        };

        let import_specifier = self.import_specifier_for(&file);
        let (analysis, rewrite) =
            transform_source(&file, &import_specifier, &self.classify_options, &self.rewrite_options)
                .map_err(|source| IndexerError::Analysis { path: path.to_path_buf(), source })?;

        for literal in &analysis.strings {
            tracing::debug!(
                "{}:{} {:?} -> {:?}",
                file.relative,
                literal.range.start,
                literal.text,
                literal.classification
            );
            if literal.classification.is_key() {
                index.record(literal.text.as_str(), &file.relative);
            }
        }

        let Some(rewrite) = rewrite else {
            return Ok(FileOutcome::Unchanged);
        };

        if self.dry_run {
            tracing::info!("Would update {} ({} literals)", file.relative, rewrite.replaced);
        } else {
            tokio::fs::write(path, &rewrite.text)
                .await
                .map_err(|source| IndexerError::Io { path: path.to_path_buf(), source })?;
            tracing::info!("Updated {}", file.relative);
        }

        Ok(FileOutcome::Updated(rewrite.replaced))
    }

    /// Scans the workspace and regenerates the locale tables. A dry run skips the
    /// tables.
    ///
    /// # Errors
    /// Returns `IndexerError::Table` when a locale table cannot be read or written.
    pub async fn run(&self) -> Result<ScanReport, IndexerError> {
        let (index, mut report) = self.scan().await;

        if self.dry_run {
            tracing::info!("Dry run: locale tables not written");
        } else {
            let generator = LocaleTableGenerator::new(ModuleDescriptions::with_overrides(
                &self.config.get_settings().module_descriptions,
            ));
            report.tables_written = generator.write_all(&self.config, &index).await?;
        }

        tracing::info!(
            "Scanned {} files: {} updated, {} failed, {} keys",
            report.files_scanned,
            report.files_updated.len(),
            report.files_failed.len(),
            report.keys_extracted
        );
        Ok(report)
    }
}
