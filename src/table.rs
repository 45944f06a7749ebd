//! Line-oriented maintenance tools for locale table files.
//!
//! None of these tools parse TypeScript. They work on the one-entry-per-line layout the
//! generator writes, and tolerate anything else in the file.

/// Duplicate key removal
mod dedup;
/// Header / entries / footer split
mod file;
pub mod format;
/// Keys used in source but missing from a table
mod missing;
/// Corrupted table recovery
mod repair;

use std::path::PathBuf;

use thiserror::Error;

pub use dedup::{
    DedupOutcome,
    deduplicate,
    deduplicate_file,
};
pub use file::TableFile;
pub use missing::{
    KeyReferenceScanner,
    MissingReport,
    defined_keys,
    find_missing,
    find_missing_in_workspace,
};
pub use repair::{
    RepairOutcome,
    clean_corrupted,
    render_canonical,
    repair,
    repair_file,
};

/// テーブルファイルの読み書きエラー
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read table file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write table file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
