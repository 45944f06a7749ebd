//! Decides which literals are user-facing text.
//!
//! The rules are deliberately shallow: they look at the literal's immediate syntactic
//! position and, failing that, at whether the text reads like a sentence.

use std::collections::HashSet;

use super::types::{
    Callee,
    Classification,
    LiteralContext,
    SkipReason,
    TranslateReason,
};
use crate::config::ToolSettings;

/// `@clack/prompts` style calls; `note` accepts any argument.
const PROMPT_METHODS: [&str; 6] = ["intro", "outro", "text", "confirm", "select", "multiselect"];
/// Status bar setters of the TUI.
const STATUS_METHODS: [&str; 4] = ["setText", "setMessage", "setActivityStatus", "setConnectionStatus"];
/// Terminal theme helpers wrapping display text.
const THEME_METHODS: [&str; 5] = ["header", "dim", "bold", "accent", "accentSoft"];
/// Runtime and logger reporting methods.
const REPORT_METHODS: [&str; 2] = ["error", "warn"];
/// Object properties holding prompt text.
const UI_PROPERTIES: [&str; 7] = ["message", "placeholder", "text", "title", "desc", "label", "hint"];

/// Inputs to [`classify`] that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
    pub translation_fn: String,
    pub ignored_strings: HashSet<String>,
}

impl ClassifyOptions {
    #[must_use]
    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            translation_fn: settings.translation_fn.clone(),
            ignored_strings: settings.ignored_strings.iter().cloned().collect(),
        }
    }
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self::from_settings(&ToolSettings::default())
    }
}

/// Classifies a literal with decoded `text` found at `context`. First matching rule
/// wins.
#[must_use]
pub fn classify(text: &str, context: &LiteralContext, options: &ClassifyOptions) -> Classification {
    if options.ignored_strings.contains(text) {
        return Classification::Skip(SkipReason::Ignored);
    }
    if text.trim().is_empty() {
        return Classification::Skip(SkipReason::Blank);
    }

    match context {
        LiteralContext::ModuleSpecifier => Classification::Skip(SkipReason::ModuleSpecifier),
        LiteralContext::LiteralType => Classification::Skip(SkipReason::LiteralType),
        LiteralContext::NamePosition => Classification::Skip(SkipReason::NamePosition),
        LiteralContext::TaggedTemplate => Classification::Skip(SkipReason::TaggedTemplate),
        LiteralContext::CallArgument { callee, index } => {
            classify_call_argument(callee, *index, options).unwrap_or_else(|| heuristic(text))
        }
        LiteralContext::NewArgument { constructor: Some(name), .. } if name == "Error" => {
            Classification::Translate(TranslateReason::ErrorConstructor)
        }
        LiteralContext::PropertyValue { name } if UI_PROPERTIES.contains(&name.as_str()) => {
            Classification::Translate(TranslateReason::UiProperty)
        }
        LiteralContext::PropertyValue { name } if name == "initialValue" => {
            Classification::Skip(SkipReason::InitialValue)
        }
        LiteralContext::NewArgument { .. }
        | LiteralContext::PropertyValue { .. }
        | LiteralContext::JsxAttribute
        | LiteralContext::Other => heuristic(text),
    }
}

/// Rules for call arguments. `None` defers to the heuristic.
fn classify_call_argument(
    callee: &Callee,
    index: usize,
    options: &ClassifyOptions,
) -> Option<Classification> {
    let reason = match callee {
        Callee::Member { object: Some(object), .. } if object == "console" => {
            TranslateReason::Console
        }
        Callee::Identifier(name) if *name == options.translation_fn => {
            return Some(if index == 0 {
                Classification::AlreadyTranslated
            } else {
                Classification::Skip(SkipReason::TranslationCallArgument)
            });
        }
        Callee::Member { property, .. } => match (property.as_str(), index) {
            ("description", 0) => TranslateReason::CommandDescription,
            ("option", 1) => TranslateReason::CommandOption,
            ("note", _) => TranslateReason::Prompt,
            (name, 0) if PROMPT_METHODS.contains(&name) => TranslateReason::Prompt,
            (name, _) if STATUS_METHODS.contains(&name) => TranslateReason::StatusText,
            (name, _) if THEME_METHODS.contains(&name) => TranslateReason::Theme,
            (name, _) if REPORT_METHODS.contains(&name) => TranslateReason::ErrorReport,
            _ => return None,
        },
        Callee::Identifier(_) | Callee::Other => return None,
    };
    Some(Classification::Translate(reason))
}

/// Sentence-like text: has a space, is not a flag or a path, and does not look like
/// module syntax.
fn heuristic(text: &str) -> Classification {
    let looks_like_prose = text.contains(' ')
        && !text.starts_with('-')
        && !text.starts_with('/')
        && !text.starts_with("./")
        && !text.starts_with("../")
        && !text.contains("import ")
        && !text.contains("export ")
        && !text.contains("from ");

    if looks_like_prose {
        Classification::Translate(TranslateReason::NaturalLanguage)
    } else {
        Classification::Skip(SkipReason::NotNaturalLanguage)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;

    #[fixture]
    fn options() -> ClassifyOptions {
        ClassifyOptions::default()
    }

    fn member(object: Option<&str>, property: &str) -> Callee {
        Callee::Member { object: object.map(String::from), property: property.to_string() }
    }

    fn call(callee: Callee, index: usize) -> LiteralContext {
        LiteralContext::CallArgument { callee, index }
    }

    fn property(name: &str) -> LiteralContext {
        LiteralContext::PropertyValue { name: name.to_string() }
    }

    #[rstest]
    #[case::ignored("utf-8", LiteralContext::Other, Classification::Skip(SkipReason::Ignored))]
    #[case::ignored_even_in_console("main", call(member(Some("console"), "log"), 0), Classification::Skip(SkipReason::Ignored))]
    #[case::blank("   ", call(member(Some("console"), "log"), 0), Classification::Skip(SkipReason::Blank))]
    #[case::import("some module", LiteralContext::ModuleSpecifier, Classification::Skip(SkipReason::ModuleSpecifier))]
    #[case::literal_type("fast mode", LiteralContext::LiteralType, Classification::Skip(SkipReason::LiteralType))]
    #[case::property_key("Display name", LiteralContext::NamePosition, Classification::Skip(SkipReason::NamePosition))]
    #[case::tagged("select * from t", LiteralContext::TaggedTemplate, Classification::Skip(SkipReason::TaggedTemplate))]
    fn skip_rules(
        options: ClassifyOptions,
        #[case] text: &str,
        #[case] context: LiteralContext,
        #[case] expected: Classification,
    ) {
        assert_that!(classify(text, &context, &options), eq(expected));
    }

    #[rstest]
    #[case::first_arg("Hello world", 0, Classification::AlreadyTranslated)]
    #[case::single_word_key("Cancel", 0, Classification::AlreadyTranslated)]
    #[case::later_arg("other text", 1, Classification::Skip(SkipReason::TranslationCallArgument))]
    fn translation_call(
        options: ClassifyOptions,
        #[case] text: &str,
        #[case] index: usize,
        #[case] expected: Classification,
    ) {
        let context = call(Callee::Identifier("t".to_string()), index);

        assert_that!(classify(text, &context, &options), eq(expected));
    }

    #[rstest]
    fn custom_translation_function() {
        let options = ClassifyOptions { translation_fn: "tr".to_string(), ..ClassifyOptions::default() };

        assert_that!(
            classify("Cancel", &call(Callee::Identifier("tr".to_string()), 0), &options),
            eq(Classification::AlreadyTranslated)
        );
        assert_that!(
            classify("Cancel", &call(Callee::Identifier("t".to_string()), 0), &options),
            eq(Classification::Skip(SkipReason::NotNaturalLanguage))
        );
    }

    #[rstest]
    #[case::console_log(member(Some("console"), "log"), 0, "Done", TranslateReason::Console)]
    #[case::console_error_second(member(Some("console"), "error"), 1, "x", TranslateReason::Console)]
    #[case::description(member(Some("program"), "description"), 0, "Run", TranslateReason::CommandDescription)]
    #[case::option_description(member(None, "option"), 1, "Force", TranslateReason::CommandOption)]
    #[case::note_title(member(Some("prompts"), "note"), 1, "Title", TranslateReason::Prompt)]
    #[case::intro(member(Some("p"), "intro"), 0, "Welcome", TranslateReason::Prompt)]
    #[case::confirm(member(None, "confirm"), 0, "Sure?", TranslateReason::Prompt)]
    #[case::set_status(member(Some("tui"), "setConnectionStatus"), 0, "connected", TranslateReason::StatusText)]
    #[case::theme(member(Some("theme"), "accentSoft"), 0, "OpenClaw", TranslateReason::Theme)]
    #[case::runtime_error(member(Some("runtime"), "error"), 0, "Failed", TranslateReason::ErrorReport)]
    #[case::logger_warn(member(None, "warn"), 2, "Careful", TranslateReason::ErrorReport)]
    fn translated_calls(
        options: ClassifyOptions,
        #[case] callee: Callee,
        #[case] index: usize,
        #[case] text: &str,
        #[case] reason: TranslateReason,
    ) {
        assert_that!(
            classify(text, &call(callee, index), &options),
            eq(Classification::Translate(reason))
        );
    }

    #[rstest]
    #[case::option_flag(member(None, "option"), 0, "--force")]
    #[case::description_second(member(None, "description"), 1, "Extra")]
    #[case::intro_second(member(None, "intro"), 1, "Extra")]
    #[case::unknown_method(member(None, "push"), 0, "value")]
    #[case::plain_function(Callee::Identifier("log".to_string()), 0, "value")]
    fn calls_without_rule_fall_back_to_heuristic(
        options: ClassifyOptions,
        #[case] callee: Callee,
        #[case] index: usize,
        #[case] text: &str,
    ) {
        assert_that!(
            classify(text, &call(callee, index), &options),
            eq(Classification::Skip(SkipReason::NotNaturalLanguage))
        );
    }

    #[rstest]
    fn error_constructor(options: ClassifyOptions) {
        let error = LiteralContext::NewArgument { constructor: Some("Error".to_string()), index: 0 };
        let other = LiteralContext::NewArgument { constructor: Some("URL".to_string()), index: 0 };

        assert_that!(
            classify("boom", &error, &options),
            eq(Classification::Translate(TranslateReason::ErrorConstructor))
        );
        assert_that!(
            classify("https://x", &other, &options),
            eq(Classification::Skip(SkipReason::NotNaturalLanguage))
        );
    }

    #[rstest]
    #[case::message("message", "Pick one", Classification::Translate(TranslateReason::UiProperty))]
    #[case::hint("hint", "recommended", Classification::Translate(TranslateReason::UiProperty))]
    #[case::initial_value("initialValue", "Local gateway", Classification::Skip(SkipReason::InitialValue))]
    #[case::other_prose("mode", "Local gateway", Classification::Translate(TranslateReason::NaturalLanguage))]
    #[case::other_word("mode", "local", Classification::Skip(SkipReason::NotNaturalLanguage))]
    fn property_values(
        options: ClassifyOptions,
        #[case] name: &str,
        #[case] text: &str,
        #[case] expected: Classification,
    ) {
        assert_that!(classify(text, &property(name), &options), eq(expected));
    }

    #[rstest]
    #[case::sentence("Gateway is running", true)]
    #[case::single_word("gateway", false)]
    #[case::flag("-m, --message <text>", false)]
    #[case::absolute_path("/usr/local bin", false)]
    #[case::relative_path("./my dir", false)]
    #[case::parent_path("../my dir", false)]
    #[case::import_code("import x from y", false)]
    #[case::export_code("export default foo", false)]
    #[case::from_word("Sent from my phone", false)]
    fn natural_language_heuristic(
        options: ClassifyOptions,
        #[case] text: &str,
        #[case] translatable: bool,
    ) {
        assert_that!(
            classify(text, &LiteralContext::Other, &options).is_translatable(),
            eq(translatable)
        );
    }
}
