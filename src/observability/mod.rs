//! File-based logging for the table engine.
//!
//! Spans and events emitted with `tracing` throughout the crate (event
//! handling, filter application, fetch issue and settlement, stale response
//! drops) are formatted as text lines and written to a size-rotated log file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFile → datagrid.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `<data dir>/datagrid.log`, never the terminal, so log
//!   lines cannot corrupt a rendered frame
//! - **Automatic Rotation**: files rotate at 10 MB with 3-backup retention
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, LOG_FILE_NAME};
