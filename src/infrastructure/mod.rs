//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the log file lives and expands user-supplied paths.

pub mod paths;

pub use paths::{data_dir, expand_tilde};
