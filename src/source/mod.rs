//! Bundled data sources for server-mode tables.
//!
//! # Modules
//!
//! - `memory`: Answers queries from rows held in memory
//! - `json`: Answers queries from a JSON row file, re-read on every fetch
//! - `query`: Filter, sort and slice execution shared by both

pub mod json;
pub mod memory;
pub mod query;

pub use json::{load_rows, JsonFileSource};
pub use memory::MemorySource;
pub use query::run_query;
