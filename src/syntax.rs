//! Syntax analysis of TypeScript/JavaScript sources.

pub mod analyzer;

pub use analyzer::classifier::ClassifyOptions;
pub use analyzer::rewriter::{
    Rewrite,
    RewriteOptions,
};
pub use analyzer::types::{
    AnalyzerError,
    Classification,
    ExtractedString,
    FileAnalysis,
};

use crate::input::source::SourceFile;

/// Analyzes a source file and classifies its string literals.
///
/// # Errors
/// Returns `AnalyzerError` when the file cannot be parsed.
pub fn analyze_source(
    file: &SourceFile,
    options: &ClassifyOptions,
) -> Result<FileAnalysis, AnalyzerError> {
    analyzer::extractor::analyze_literals(&file.text, file.language, options)
}

/// Analyzes and rewrites a source file in one step.
///
/// Returns the analysis together with the rewritten text, if any literal was replaced.
///
/// # Errors
/// Returns `AnalyzerError` when the file cannot be parsed.
pub fn transform_source(
    file: &SourceFile,
    import_specifier: &str,
    classify_options: &ClassifyOptions,
    rewrite_options: &RewriteOptions,
) -> Result<(FileAnalysis, Option<Rewrite>), AnalyzerError> {
    let analysis = analyze_source(file, classify_options)?;
    let rewrite = analyzer::rewriter::rewrite_source(
        &file.text,
        &analysis,
        file.language,
        import_specifier,
        rewrite_options,
    );
    Ok((analysis, rewrite))
}
