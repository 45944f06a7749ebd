//! Workspace scanning: finds target files, rewrites them and builds the extraction
//! index consumed by the locale table generator.

pub mod types;
pub mod workspace;

pub use types::{
    ExtractionIndex,
    IndexerError,
    ScanReport,
};
pub use workspace::{
    WorkspaceScanner,
    find_source_files,
};
