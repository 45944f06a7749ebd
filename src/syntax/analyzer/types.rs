//! Types for the analyzer module

use std::str::FromStr;

use thiserror::Error;

use crate::types::{
    ByteSpan,
    SourceRange,
};

/// Tree-sitter クエリで使用するキャプチャ名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureName {
    /// 文字列リテラル (`"..."` / `'...'`)
    StringLiteral,
    /// テンプレートリテラル (`` `...` ``)
    TemplateLiteral,
}

impl CaptureName {
    /// Tree-sitter クエリで使用する文字列表現を取得
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StringLiteral => "literal.string",
            Self::TemplateLiteral => "literal.template",
        }
    }
}

/// 文字列から `CaptureName` への変換エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCaptureNameError;

impl FromStr for CaptureName {
    type Err = ParseCaptureNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal.string" => Ok(Self::StringLiteral),
            "literal.template" => Ok(Self::TemplateLiteral),
            _ => Err(ParseCaptureNameError),
        }
    }
}

/// The function part of a call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    /// `name(...)`
    Identifier(String),
    /// `object.property(...)`; `object` is set only when it is a plain identifier.
    Member { object: Option<String>, property: String },
    /// Anything else (`fn()()`, `(a || b)()`, ...).
    Other,
}

/// The syntactic position of a literal, as far as classification cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralContext {
    /// `import ... from "x"`, `export ... from "x"`, `import("x")`.
    ModuleSpecifier,
    /// TypeScript literal type: `type Mode = "fast"`.
    LiteralType,
    /// A position that must stay a literal: property keys, `declare module "x"`.
    NamePosition,
    /// The template of a tagged template: ``sql`...` ``.
    TaggedTemplate,
    /// Argument `index` of a call (comments are not counted).
    CallArgument { callee: Callee, index: usize },
    /// Argument `index` of `new Constructor(...)`.
    NewArgument { constructor: Option<String>, index: usize },
    /// Value of an object property `name: "..."`.
    PropertyValue { name: String },
    /// Value of a JSX attribute: `<input placeholder="..." />`.
    JsxAttribute,
    /// Anywhere else.
    Other,
}

/// Why a literal is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Listed in `ignoredStrings`.
    Ignored,
    Blank,
    ModuleSpecifier,
    LiteralType,
    NamePosition,
    TaggedTemplate,
    /// `initialValue` often feeds a literal-typed option.
    InitialValue,
    /// A later argument of the translation call.
    TranslationCallArgument,
    /// The natural-language heuristic did not match.
    NotNaturalLanguage,
}

/// Why a literal is considered user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslateReason {
    Console,
    CommandDescription,
    CommandOption,
    Prompt,
    StatusText,
    Theme,
    ErrorReport,
    ErrorConstructor,
    UiProperty,
    NaturalLanguage,
}

/// Outcome of classifying one literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Skip(SkipReason),
    /// Already the first argument of the translation call: a key, never re-wrapped.
    AlreadyTranslated,
    Translate(TranslateReason),
}

impl Classification {
    #[must_use]
    pub const fn is_translatable(self) -> bool {
        matches!(self, Self::Translate(_))
    }

    /// Whether the literal text belongs in the locale tables.
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::Translate(_) | Self::AlreadyTranslated)
    }
}

/// A literal found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedString {
    /// Literal value with escapes decoded.
    pub text: String,
    pub context: LiteralContext,
    pub classification: Classification,
    pub range: SourceRange,
    /// Bytes of the whole literal, quotes included.
    pub span: ByteSpan,
}

impl ExtractedString {
    /// Translatable and free of `${`, so it can be replaced by a call.
    #[must_use]
    pub fn is_rewritable(&self) -> bool {
        self.classification.is_translatable() && !self.text.contains("${")
    }
}

/// Result of analyzing one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    /// Literals in source order.
    pub strings: Vec<ExtractedString>,
    /// The file already imports the translation function from an i18n module.
    pub has_translation_import: bool,
    /// Byte offset where a new import statement goes.
    pub import_anchor: ImportAnchor,
}

/// Where a new import statement is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportAnchor {
    /// After the last top-level import, which ends at this byte.
    AfterImport(usize),
    /// After the shebang line, which ends at this byte (newline excluded).
    AfterShebang(usize),
    #[default]
    FileStart,
}

/// Defines errors that may occur during the analysis process
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// Error when failing to parse source code
    #[error("Failed to parse source code")]
    ParseFailed,
    /// Error when the literal query is unavailable
    #[error("Query execution failed: {0}")]
    QueryExecution(String),
}
