//! openclaw-i18n
//!
//! OpenClaw CLI のロケール解決と、ロケールテーブルを保守するための auto-i18n ツール群
//!
//! - [`i18n`]: runtime translation (`t`, locale state, built-in tables)
//! - [`syntax`] / [`indexer`]: the auto-i18n scanner
//! - [`generator`]: locale table generation
//! - [`table`]: dedup, find-missing and repair tools

pub mod config;
pub mod generator;
pub mod i18n;
pub mod indexer;
pub mod input;
pub mod syntax;
pub mod table;
pub mod types;

pub use i18n::{
    Locale,
    get_locale,
    set_locale,
    t,
    t_with,
};
