//! Key resolution with locale fallback and `{{name}}` interpolation.

use std::collections::BTreeMap;

use super::{
    Locale,
    LocaleContext,
    TranslationSet,
    process_context,
};

/// Named values substituted into `{{name}}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateArgs {
    /// name → stringified value
    values: BTreeMap<String, String>,
}

impl TranslateArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name`, stringified with its `Display` form.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for TranslateArgs
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

/// Replaces every `{{name}}` that has a value in `args`.
///
/// Runs as a single left-to-right pass: substituted text is never scanned again, and
/// placeholders without a value are copied through unchanged.
#[must_use]
pub fn interpolate(template: &str, args: &TranslateArgs) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(rest.get(..open).unwrap_or_default());
        let body = rest.get(open + 2..).unwrap_or_default();

        let Some(close) = body.find("}}") else {
            output.push_str("{{");
            output.push_str(body);
            return output;
        };

        let name = body.get(..close).unwrap_or_default();
        if !name.contains("{{")
            && let Some(value) = args.get(name)
        {
            output.push_str(value);
            rest = body.get(close + 2..).unwrap_or_default();
        } else {
            // "{{" をそのまま残し、直後から再走査する
            output.push_str("{{");
            rest = body;
        }
    }

    output.push_str(rest);
    output
}

/// Resolves keys against a [`TranslationSet`] using a [`LocaleContext`] for the
/// default locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    /// Tables to search.
    translations: &'a TranslationSet,
    /// Supplies the locale when none is given.
    context: &'a LocaleContext,
}

impl<'a> Translator<'a> {
    #[must_use]
    pub const fn new(translations: &'a TranslationSet, context: &'a LocaleContext) -> Self {
        Self { translations, context }
    }

    /// Built-in tables and the process-wide locale state.
    #[must_use]
    pub fn global() -> Translator<'static> {
        Translator::new(TranslationSet::builtin(), process_context())
    }

    /// Resolves `key` without interpolation.
    ///
    /// Order: `locale` (or the context's locale), then `en_US`, then the key itself.
    #[must_use]
    pub fn lookup<'k>(&self, key: &'k str, locale: Option<Locale>) -> &'k str
    where
        'a: 'k,
    {
        let locale = locale.unwrap_or_else(|| self.context.get_locale());
        self.translations
            .get(locale, key)
            .or_else(|| self.translations.get(Locale::DEFAULT, key))
            .unwrap_or(key)
    }

    /// Resolves `key` and fills placeholders from `args`. Never fails.
    #[must_use]
    pub fn translate(
        &self,
        key: &str,
        args: Option<&TranslateArgs>,
        locale: Option<Locale>,
    ) -> String {
        let resolved = self.lookup(key, locale);
        match args {
            Some(args) => interpolate(resolved, args),
            None => resolved.to_string(),
        }
    }
}
