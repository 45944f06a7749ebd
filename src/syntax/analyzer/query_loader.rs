//! Load Tree-sitter queries from files.

use std::sync::OnceLock;

use tree_sitter::Query;

use crate::input::source::ProgrammingLanguage;

/// Literal query for JavaScript and JSX.
const JS_LITERALS: &str = include_str!("../../../queries/javascript/literals.scm");
/// Literal query for TypeScript.
const TS_LITERALS: &str = include_str!("../../../queries/typescript/literals.scm");
/// Literal query for TSX.
const TSX_LITERALS: &str = include_str!("../../../queries/tsx/literals.scm");

/// JavaScript クエリのキャッシュ
static JS_QUERY_CACHE: OnceLock<Option<Query>> = OnceLock::new();
/// TypeScript クエリのキャッシュ
static TS_QUERY_CACHE: OnceLock<Option<Query>> = OnceLock::new();
/// TSX クエリのキャッシュ
static TSX_QUERY_CACHE: OnceLock<Option<Query>> = OnceLock::new();

/// Compiles the literal query for `language`, logging failures.
fn parse_query(language: ProgrammingLanguage) -> Option<Query> {
    let tree_sitter_lang = language.tree_sitter_language();

    let content = match language {
        ProgrammingLanguage::JavaScript | ProgrammingLanguage::Jsx => JS_LITERALS,
        ProgrammingLanguage::TypeScript => TS_LITERALS,
        ProgrammingLanguage::Tsx => TSX_LITERALS,
    };

    Query::new(&tree_sitter_lang, content)
        .map_err(|e| tracing::error!("Failed to parse literals query for {language:?}: {e:?}"))
        .ok()
}

/// Loads the cached literal query for a language. Parsed once per language.
#[must_use]
pub fn load_literal_query(language: ProgrammingLanguage) -> Option<&'static Query> {
    match language {
        ProgrammingLanguage::JavaScript | ProgrammingLanguage::Jsx => {
            JS_QUERY_CACHE.get_or_init(|| parse_query(ProgrammingLanguage::JavaScript))
        }
        ProgrammingLanguage::TypeScript => {
            TS_QUERY_CACHE.get_or_init(|| parse_query(ProgrammingLanguage::TypeScript))
        }
        ProgrammingLanguage::Tsx => {
            TSX_QUERY_CACHE.get_or_init(|| parse_query(ProgrammingLanguage::Tsx))
        }
    }
    .as_ref()
}
