//! Current-locale state: an explicit override on top of environment detection.

use std::collections::HashMap;
use std::sync::{
    LazyLock,
    PoisonError,
    RwLock,
};

use super::Locale;

/// Environment variables consulted for the locale, highest priority first.
pub const LOCALE_ENV_VARS: [&str; 4] = ["OPENCLAW_LANG", "LANG", "LC_ALL", "LC_MESSAGES"];

/// Where environment variables are read from.
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The live process environment.
    #[default]
    Process,
    /// A fixed snapshot, mostly for tests.
    Snapshot(HashMap<String, String>),
}

impl EnvSource {
    /// Builds a snapshot from `(name, value)` pairs.
    pub fn snapshot<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Snapshot(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Value of `name`, if set.
    fn var(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Snapshot(vars) => vars.get(name).cloned(),
        }
    }
}

/// Detects the locale from the environment.
///
/// The first variable of [`LOCALE_ENV_VARS`] that is set and non-empty decides: it
/// selects `zh_CN` when it contains `zh_cn` or `zh-cn` (case-insensitive), otherwise
/// `en_US`. With none of them set the result is `en_US`.
#[must_use]
pub fn detect_locale(env: &EnvSource) -> Locale {
    let Some(value) =
        LOCALE_ENV_VARS.iter().filter_map(|name| env.var(name)).find(|value| !value.is_empty())
    else {
        return Locale::DEFAULT;
    };

    let value = value.to_ascii_lowercase();
    if value.contains("zh_cn") || value.contains("zh-cn") { Locale::ZhCn } else { Locale::EnUs }
}

/// Holds the locale override for one process (or one test).
///
/// Until [`LocaleContext::set_locale`] is called, [`LocaleContext::get_locale`] reports
/// the environment-derived locale. After that the override wins for the lifetime of the
/// context. There is no way to clear it.
#[derive(Debug, Default)]
pub struct LocaleContext {
    /// `set_locale` の値
    override_locale: RwLock<Option<Locale>>,
    /// Where the environment locale is read from.
    env: EnvSource,
}

impl LocaleContext {
    /// A context reading the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context reading `env` instead of the process environment.
    #[must_use]
    pub fn with_env(env: EnvSource) -> Self {
        Self { override_locale: RwLock::new(None), env }
    }

    #[must_use]
    pub fn get_locale(&self) -> Locale {
        let current = *self.override_locale.read().unwrap_or_else(PoisonError::into_inner);
        current.unwrap_or_else(|| detect_locale(&self.env))
    }

    pub fn set_locale(&self, locale: Locale) {
        *self.override_locale.write().unwrap_or_else(PoisonError::into_inner) = Some(locale);
    }
}

/// Context shared by the free functions.
static PROCESS_CONTEXT: LazyLock<LocaleContext> = LazyLock::new(LocaleContext::new);

/// The process-wide context behind [`super::get_locale`] and [`super::set_locale`].
#[must_use]
pub fn process_context() -> &'static LocaleContext {
    &PROCESS_CONTEXT
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::nothing_set(&[], Locale::EnUs)]
    #[case::lang_zh(&[("LANG", "zh_CN.UTF-8")], Locale::ZhCn)]
    #[case::lang_dash_lowercase(&[("LANG", "zh-cn")], Locale::ZhCn)]
    #[case::lang_en(&[("LANG", "en_US.UTF-8")], Locale::EnUs)]
    #[case::lc_all_when_lang_unset(&[("LC_ALL", "zh_CN.UTF-8")], Locale::ZhCn)]
    #[case::lc_messages(&[("LC_MESSAGES", "ZH_CN")], Locale::ZhCn)]
    #[case::empty_lang_skipped(&[("LANG", ""), ("LC_ALL", "zh_CN.UTF-8")], Locale::ZhCn)]
    #[case::lang_beats_lc_all(&[("LANG", "en_US.UTF-8"), ("LC_ALL", "zh_CN.UTF-8")], Locale::EnUs)]
    #[case::product_var_beats_lang(&[("OPENCLAW_LANG", "zh_CN"), ("LANG", "en_US")], Locale::ZhCn)]
    #[case::product_var_en(&[("OPENCLAW_LANG", "en_US"), ("LANG", "zh_CN")], Locale::EnUs)]
    #[case::language_only(&[("LANG", "zh")], Locale::EnUs)]
    fn test_detect_locale(#[case] vars: &[(&str, &str)], #[case] expected: Locale) {
        let env = EnvSource::snapshot(vars.iter().copied());

        assert_that!(detect_locale(&env), eq(expected));
    }

    #[rstest]
    fn override_takes_precedence_over_environment() {
        let context = LocaleContext::with_env(EnvSource::snapshot([("LANG", "zh_CN.UTF-8")]));
        assert_that!(context.get_locale(), eq(Locale::ZhCn));

        context.set_locale(Locale::EnUs);

        assert_that!(context.get_locale(), eq(Locale::EnUs));
        assert_that!(context.get_locale(), eq(Locale::EnUs));
    }

    #[rstest]
    fn last_override_wins() {
        let context = LocaleContext::with_env(EnvSource::default());

        context.set_locale(Locale::ZhCn);
        context.set_locale(Locale::EnUs);

        assert_that!(context.get_locale(), eq(Locale::EnUs));
    }
}
