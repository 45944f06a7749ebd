//! Rewrites translatable literals into translation calls.

use std::path::{
    Component,
    Path,
};

use super::types::{
    ExtractedString,
    FileAnalysis,
    ImportAnchor,
    LiteralContext,
};
use crate::config::ToolSettings;
use crate::input::source::ProgrammingLanguage;
use crate::table::format::quote;
use crate::types::ByteSpan;

/// Settings that shape the emitted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    pub translation_fn: String,
    /// Append `as any` to calls in TypeScript files.
    pub cast_to_any: bool,
}

impl RewriteOptions {
    #[must_use]
    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self { translation_fn: settings.translation_fn.clone(), cast_to_any: settings.cast_to_any }
    }
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self::from_settings(&ToolSettings::default())
    }
}

/// A rewritten source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Number of literals replaced.
    pub replaced: usize,
    pub import_added: bool,
}

/// A single text edit. An empty span inserts.
#[derive(Debug)]
struct Edit {
    /// Bytes replaced.
    span: ByteSpan,
    /// Replacement text.
    text: String,
}

/// Code that replaces `literal`.
#[must_use]
pub fn replacement_for(
    literal: &ExtractedString,
    language: ProgrammingLanguage,
    options: &RewriteOptions,
) -> String {
    let mut call = format!("{}({})", options.translation_fn, quote(&literal.text));
    if options.cast_to_any && language.is_typescript() {
        call.push_str(" as any");
    }
    if literal.context == LiteralContext::JsxAttribute {
        call = format!("{{{call}}}");
    }
    call
}

/// `import { t } from "<specifier>";`
fn import_statement(translation_fn: &str, specifier: &str) -> String {
    format!("import {{ {translation_fn} }} from {};", quote(specifier))
}

/// Replaces every rewritable literal of `analysis` and adds the translation import
/// when the file lacks one.
///
/// Returns `None` when nothing is replaced; such files are left untouched.
#[must_use]
pub fn rewrite_source(
    source: &str,
    analysis: &FileAnalysis,
    language: ProgrammingLanguage,
    import_specifier: &str,
    options: &RewriteOptions,
) -> Option<Rewrite> {
    let mut edits: Vec<Edit> = analysis
        .strings
        .iter()
        .filter(|literal| literal.is_rewritable())
        .map(|literal| Edit { span: literal.span, text: replacement_for(literal, language, options) })
        .collect();

    let replaced = edits.len();
    if replaced == 0 {
        return None;
    }

    let import_added = !analysis.has_translation_import;
    if import_added {
        let statement = import_statement(&options.translation_fn, import_specifier);
        let edit = match analysis.import_anchor {
            ImportAnchor::AfterImport(end) | ImportAnchor::AfterShebang(end) => {
                Edit { span: ByteSpan::new(end, end), text: format!("\n{statement}") }
            }
            ImportAnchor::FileStart => {
                Edit { span: ByteSpan::new(0, 0), text: format!("{statement}\n") }
            }
        };
        edits.push(edit);
    }

    // 同じ位置では挿入を置換より先に適用する
    edits.sort_by_key(|edit| edit.span);

    let mut text = String::with_capacity(source.len() + edits.len() * 8);
    let mut cursor = 0;
    let mut previous: Option<ByteSpan> = None;
    for edit in &edits {
        if previous.is_some_and(|span| span.overlaps(&edit.span)) {
            tracing::debug!("Skipping overlapping edit at byte {}", edit.span.start);
            continue;
        }
        text.push_str(source.get(cursor..edit.span.start)?);
        text.push_str(&edit.text);
        cursor = edit.span.end;
        previous = Some(edit.span);
    }
    text.push_str(source.get(cursor..)?);

    Some(Rewrite { text, replaced, import_added })
}

/// Module specifier that reaches `module_path` from a file in `from_dir`.
///
/// Both paths are relative to the workspace root. The module's extension becomes
/// `.js`, and the result always starts with `.`.
#[must_use]
pub fn relative_import_specifier(from_dir: &Path, module_path: &Path) -> String {
    let normal = |path: &Path| -> Vec<String> {
        path.components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    };

    let from = normal(from_dir);
    let module_dir = normal(module_path.parent().unwrap_or_else(|| Path::new("")));
    let common = from.iter().zip(&module_dir).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len().saturating_sub(common)];
    parts.extend(module_dir.into_iter().skip(common));

    let file_name = module_path
        .file_stem()
        .map_or_else(|| "index".to_string(), |stem| stem.to_string_lossy().into_owned());
    parts.push(format!("{file_name}.js"));

    let specifier = parts.join("/");
    if specifier.starts_with('.') { specifier } else { format!("./{specifier}") }
}
