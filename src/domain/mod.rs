//! Domain layer for the datagrid engine.
//!
//! This module contains the core value and error types, independent of any
//! rendering or data-source concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`value`]: Cell values produced by column accessors
//!
//! # Examples
//!
//! ```
//! use datagrid::domain::{CellValue, Result};
//!
//! fn status_of(open: bool) -> Result<CellValue> {
//!     Ok(CellValue::from(if open { "Open" } else { "Closed" }))
//! }
//!
//! assert_eq!(status_of(false).unwrap().to_string(), "Closed");
//! ```

pub mod error;
pub mod value;

pub use error::{GridError, Result};
pub use value::{CellValue, SortKey};
