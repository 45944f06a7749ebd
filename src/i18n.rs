//! Runtime translation: locale state and key resolution.
//!
//! The free functions use the built-in tables and a process-wide [`LocaleContext`].
//! Code that needs its own tables or locale state builds a [`Translator`] instead.
//!
//! ```
//! use openclaw_i18n::i18n::{Locale, TranslateArgs, t_with};
//!
//! let args = TranslateArgs::new().with("name", "Ada");
//! assert_eq!(t_with("Hello, {{name}}", Some(&args), Some(Locale::ZhCn)), "你好，Ada");
//! assert_eq!(t_with("Not a known key", None, Some(Locale::ZhCn)), "Not a known key");
//! ```

/// Supported locales
mod locale;
/// Key lookup and placeholder substitution
mod resolver;
/// Current-locale state
mod state;
/// Parsed locale tables
mod table;

pub use locale::{
    Locale,
    ParseLocaleError,
};
pub use resolver::{
    TranslateArgs,
    Translator,
    interpolate,
};
pub use state::{
    EnvSource,
    LOCALE_ENV_VARS,
    LocaleContext,
    detect_locale,
    process_context,
};
pub use table::{
    LocaleTable,
    TranslationSet,
};

/// The process locale: the [`set_locale`] override if any, else the environment's.
#[must_use]
pub fn get_locale() -> Locale {
    process_context().get_locale()
}

/// Overrides the process locale for every later call.
pub fn set_locale(locale: Locale) {
    process_context().set_locale(locale);
}

/// Translates `key` into the process locale.
#[must_use]
pub fn t(key: &str) -> String {
    Translator::global().translate(key, None, None)
}

/// Translates `key` with optional placeholder values and an explicit locale.
#[must_use]
pub fn t_with(key: &str, args: Option<&TranslateArgs>, locale: Option<Locale>) -> String {
    Translator::global().translate(key, args, locale)
}

/// `t!("key")` or `t!("Hello, {{name}}", name = user)`.
#[macro_export]
macro_rules! t {
    ($key:expr $(,)?) => {
        $crate::i18n::t($key)
    };
    ($key:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $crate::i18n::t_with(
            $key,
            Some(&$crate::i18n::TranslateArgs::new()$(.with(stringify!($name), $value))+),
            None,
        )
    };
}
