//! The closed set of supported locales.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A supported UI locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Locale {
    /// English (United States). Default locale and final fallback.
    #[default]
    EnUs,
    /// Simplified Chinese.
    ZhCn,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Self; 2] = [Self::EnUs, Self::ZhCn];

    /// The locale every lookup falls back to.
    pub const DEFAULT: Self = Self::EnUs;

    /// Identifier used for table file names and constants (`en_US`, `zh_CN`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::ZhCn => "zh_CN",
        }
    }

    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::EnUs)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未対応のロケール文字列
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported locale '{0}'. Supported locales: en_US, zh_CN")]
pub struct ParseLocaleError(pub String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    /// Accepts `en_US` / `zh_CN` in any case, with `_` or `-` as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "en_us" => Ok(Self::EnUs),
            "zh_cn" => Ok(Self::ZhCn),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::en("en_US", Locale::EnUs)]
    #[case::zh("zh_CN", Locale::ZhCn)]
    #[case::dash("zh-CN", Locale::ZhCn)]
    #[case::lowercase("zh_cn", Locale::ZhCn)]
    #[case::padded(" en-us ", Locale::EnUs)]
    fn parse_supported(#[case] input: &str, #[case] expected: Locale) {
        assert_that!(input.parse::<Locale>(), ok(eq(&expected)));
    }

    #[rstest]
    #[case::language_only("zh")]
    #[case::other("ja_JP")]
    #[case::empty("")]
    fn parse_unsupported(#[case] input: &str) {
        assert_that!(input.parse::<Locale>(), err(eq(&ParseLocaleError(input.to_string()))));
    }

    #[rstest]
    fn display_matches_table_name() {
        assert_that!(Locale::ZhCn.to_string(), eq("zh_CN"));
        assert_that!(Locale::default(), eq(Locale::DEFAULT));
        assert!(Locale::ALL[0].is_default());
    }
}
