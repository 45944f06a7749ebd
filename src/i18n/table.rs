//! Loaded locale tables.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Locale;
use crate::table::TableFile;

/// Built-in English table.
const BUILTIN_EN_US: &str = include_str!("../../locales/en_US.ts");
/// Built-in Chinese table.
const BUILTIN_ZH_CN: &str = include_str!("../../locales/zh_CN.ts");

/// Flat key → localized string map for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTable {
    /// key → value
    entries: HashMap<String, String>,
}

impl LocaleTable {
    /// Reads the entries of a table file. Later duplicates replace earlier ones, as they
    /// would in an object literal; lines that are not entries are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        TableFile::parse(text).pairs().into_iter().collect()
    }

    /// Value for `key`. Empty values count as missing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LocaleTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// All locale tables known to a resolver. A locale may have no table.
#[derive(Debug, Clone, Default)]
pub struct TranslationSet {
    /// Table per locale.
    tables: HashMap<Locale, LocaleTable>,
}

impl TranslationSet {
    #[must_use]
    pub fn from_tables(tables: impl IntoIterator<Item = (Locale, LocaleTable)>) -> Self {
        Self { tables: tables.into_iter().collect() }
    }

    /// The tables compiled into the binary, parsed on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        /// Parsed built-in tables.
        static BUILTIN: LazyLock<TranslationSet> = LazyLock::new(|| {
            TranslationSet::from_tables([
                (Locale::EnUs, LocaleTable::parse(BUILTIN_EN_US)),
                (Locale::ZhCn, LocaleTable::parse(BUILTIN_ZH_CN)),
            ])
        });
        &BUILTIN
    }

    #[must_use]
    pub fn table(&self, locale: Locale) -> Option<&LocaleTable> {
        self.tables.get(&locale)
    }

    /// Looks `key` up in `locale`'s table only.
    #[must_use]
    pub fn get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.table(locale).and_then(|table| table.get(key))
    }
}
