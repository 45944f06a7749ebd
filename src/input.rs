//! Inputs read from disk.
pub mod source;
