//! Extracts string literals and their syntactic context from a source file using
//! Tree-sitter.

use std::collections::HashSet;

use tree_sitter::{
    Node,
    Parser,
    Query,
    QueryCursor,
    StreamingIteratorMut,
};

use super::classifier::{
    ClassifyOptions,
    classify,
};
use super::query_loader::load_literal_query;
use super::types::{
    AnalyzerError,
    Callee,
    CaptureName,
    ExtractedString,
    FileAnalysis,
    ImportAnchor,
    LiteralContext,
};
use crate::input::source::ProgrammingLanguage;
use crate::table::format::unescape;
use crate::types::{
    ByteSpan,
    SourceRange,
};

/// Parent kinds whose string child is a module specifier.
const MODULE_SPECIFIER_PARENTS: [&str; 4] =
    ["import_statement", "export_statement", "import_require_clause", "external_module_reference"];

/// Module specifiers that identify the i18n module.
const I18N_MODULE_MARKERS: [&str; 2] = ["/i18n", "translations"];

/// Extracts text content from a tree-sitter node
fn extract_node_text<'s>(node: Node<'_>, source_bytes: &'s [u8]) -> Option<&'s str> {
    node.utf8_text(source_bytes).ok()
}

/// Decoded value of a string or template literal (quotes removed, escapes applied).
fn literal_value(node: Node<'_>, source_bytes: &[u8]) -> Option<String> {
    let raw = extract_node_text(node, source_bytes)?;
    let inner = raw.get(1..raw.len().saturating_sub(1))?;
    Some(unescape(inner))
}

/// Returns true if `node` is the child of `parent` stored under `field`.
fn is_field(parent: Node<'_>, field: &str, node: Node<'_>) -> bool {
    parent.child_by_field_name(field).is_some_and(|child| child.id() == node.id())
}

/// Position of `node` among the arguments, comments excluded.
fn argument_index(arguments: Node<'_>, node: Node<'_>) -> usize {
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .position(|child| child.id() == node.id())
        .unwrap_or_default()
}

/// Describes the function part of a call.
fn callee(function: Node<'_>, source_bytes: &[u8]) -> Callee {
    match function.kind() {
        "identifier" => extract_node_text(function, source_bytes)
            .map_or(Callee::Other, |name| Callee::Identifier(name.to_string())),
        "member_expression" => {
            let object = function
                .child_by_field_name("object")
                .filter(|object| object.kind() == "identifier")
                .and_then(|object| extract_node_text(object, source_bytes))
                .map(ToString::to_string);
            function
                .child_by_field_name("property")
                .and_then(|property| extract_node_text(property, source_bytes))
                .map_or(Callee::Other, |property| Callee::Member {
                    object,
                    property: property.to_string(),
                })
        }
        _ => Callee::Other,
    }
}

/// Name of an object property key (`title`, `"title"`, `'title'`).
fn property_name(key: Node<'_>, source_bytes: &[u8]) -> Option<String> {
    match key.kind() {
        "property_identifier" | "identifier" | "number" => {
            extract_node_text(key, source_bytes).map(ToString::to_string)
        }
        "string" => literal_value(key, source_bytes),
        _ => None,
    }
}

/// Context of a literal that sits inside an `arguments` node.
fn argument_context(arguments: Node<'_>, node: Node<'_>, source_bytes: &[u8]) -> LiteralContext {
    let Some(call) = arguments.parent() else {
        return LiteralContext::Other;
    };
    let index = argument_index(arguments, node);

    match call.kind() {
        "call_expression" => match call.child_by_field_name("function") {
            Some(function) if function.kind() == "import" => LiteralContext::ModuleSpecifier,
            Some(function) => {
                LiteralContext::CallArgument { callee: callee(function, source_bytes), index }
            }
            None => LiteralContext::Other,
        },
        "new_expression" => LiteralContext::NewArgument {
            constructor: call
                .child_by_field_name("constructor")
                .filter(|constructor| constructor.kind() == "identifier")
                .and_then(|constructor| extract_node_text(constructor, source_bytes))
                .map(ToString::to_string),
            index,
        },
        _ => LiteralContext::Other,
    }
}

/// Builds the classification context from the literal's parent.
fn literal_context(node: Node<'_>, source_bytes: &[u8]) -> LiteralContext {
    let Some(parent) = node.parent() else {
        return LiteralContext::Other;
    };
    let kind = parent.kind();

    if MODULE_SPECIFIER_PARENTS.contains(&kind) {
        return LiteralContext::ModuleSpecifier;
    }
    // プロパティキーやモジュール名などの位置は関数呼び出しに置き換えられない
    if is_field(parent, "name", node) || is_field(parent, "key", node) || kind == "enum_body" {
        return LiteralContext::NamePosition;
    }

    match kind {
        "literal_type" => LiteralContext::LiteralType,
        "arguments" => argument_context(parent, node, source_bytes),
        "call_expression" if is_field(parent, "arguments", node) => LiteralContext::TaggedTemplate,
        "pair" => parent
            .child_by_field_name("key")
            .and_then(|key| property_name(key, source_bytes))
            .map_or(LiteralContext::Other, |name| LiteralContext::PropertyValue { name }),
        "jsx_attribute" => LiteralContext::JsxAttribute,
        _ => LiteralContext::Other,
    }
}

/// Returns true for a template literal containing `${...}`.
fn has_substitution(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).any(|child| child.kind() == "template_substitution")
}

/// Returns true if an `import` statement brings `translation_fn` in from an i18n module.
fn imports_translation_fn(import: Node<'_>, source_bytes: &[u8], translation_fn: &str) -> bool {
    let from_i18n = import
        .child_by_field_name("source")
        .and_then(|source| literal_value(source, source_bytes))
        .is_some_and(|specifier| {
            I18N_MODULE_MARKERS.iter().any(|marker| specifier.contains(marker))
        });
    if !from_i18n {
        return false;
    }

    let mut cursor = import.walk();
    let Some(clause) =
        import.named_children(&mut cursor).find(|child| child.kind() == "import_clause")
    else {
        return false;
    };

    let mut clause_cursor = clause.walk();
    let named_imports: Vec<Node<'_>> = clause
        .named_children(&mut clause_cursor)
        .filter(|child| child.kind() == "named_imports")
        .collect();

    named_imports.into_iter().any(|named| {
        let mut specifier_cursor = named.walk();
        named
            .named_children(&mut specifier_cursor)
            .filter(|specifier| specifier.kind() == "import_specifier")
            .any(|specifier| {
                // `import { translate as t }` は `t` として使われる
                let local =
                    specifier.child_by_field_name("alias").or_else(|| specifier.child_by_field_name("name"));
                local.and_then(|n| extract_node_text(n, source_bytes)) == Some(translation_fn)
            })
    })
}

/// Finds the existing translation import and the insertion point for a new one.
fn import_info(
    root: Node<'_>,
    source: &str,
    translation_fn: &str,
) -> (bool, ImportAnchor) {
    let source_bytes = source.as_bytes();
    let mut has_import = false;
    let mut last_import_end = None;

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() != "import_statement" {
            continue;
        }
        last_import_end = Some(child.end_byte());
        has_import |= imports_translation_fn(child, source_bytes, translation_fn);
    }

    let anchor = match last_import_end {
        Some(end) => ImportAnchor::AfterImport(end),
        None if source.starts_with("#!") => {
            ImportAnchor::AfterShebang(source.find('\n').unwrap_or(source.len()))
        }
        None => ImportAnchor::FileStart,
    };

    (has_import, anchor)
}

/// Collects literal nodes matched by the query, in source order, without templates
/// that contain substitutions.
fn collect_literal_nodes<'tree>(
    query: &Query,
    root: Node<'tree>,
    source_bytes: &[u8],
) -> Vec<Node<'tree>> {
    let cap_names = query.capture_names();
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source_bytes);

    while let Some(match_) = matches.next_mut() {
        for capture in match_.captures {
            let Some(cap_name) = cap_names.get(capture.index as usize) else {
                continue;
            };
            let Ok(capture_name) = cap_name.parse::<CaptureName>() else {
                continue;
            };

            if capture_name == CaptureName::TemplateLiteral && has_substitution(capture.node) {
                continue;
            }
            if seen.insert(capture.node.id()) {
                nodes.push(capture.node);
            }
        }
    }

    nodes.sort_by_key(Node::start_byte);
    nodes
}

/// Parses `source` and classifies every string literal and substitution-free template
/// literal in it.
///
/// # Errors
/// Returns `AnalyzerError` if:
/// - Language setup fails
/// - Source code parsing fails or the tree contains syntax errors
/// - The literal query could not be loaded
pub fn analyze_literals(
    source: &str,
    language: ProgrammingLanguage,
    options: &ClassifyOptions,
) -> Result<FileAnalysis, AnalyzerError> {
    let mut parser = Parser::new();
    parser.set_language(&language.tree_sitter_language()).map_err(AnalyzerError::LanguageSetup)?;
    let tree = parser.parse(source, None).ok_or(AnalyzerError::ParseFailed)?;
    let root_node = tree.root_node();

    if root_node.has_error() {
        // 壊れた構文のファイルは書き換えない
        return Err(AnalyzerError::ParseFailed);
    }

    let query = load_literal_query(language)
        .ok_or_else(|| AnalyzerError::QueryExecution(format!("no literal query for {language:?}")))?;

    let source_bytes = source.as_bytes();
    let strings = collect_literal_nodes(query, root_node, source_bytes)
        .into_iter()
        .filter_map(|node| {
            let text = literal_value(node, source_bytes)?;
            let context = literal_context(node, source_bytes);
            let classification = classify(&text, &context, options);
            Some(ExtractedString {
                text,
                context,
                classification,
                range: SourceRange::from_node(&node),
                span: ByteSpan::from_node(&node),
            })
        })
        .collect();

    let (has_translation_import, import_anchor) =
        import_info(root_node, source, &options.translation_fn);

    Ok(FileAnalysis { strings, has_translation_import, import_anchor })
}
