//! String literal extraction, classification and rewriting.

pub mod classifier;
pub mod extractor;
pub mod query_loader;
pub mod rewriter;
pub mod types;
