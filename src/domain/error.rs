//! Error types for the datagrid engine.
//!
//! This module defines the centralized error type [`GridError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for datagrid operations.
///
/// This enum consolidates all error conditions that can occur while loading
/// configuration, reading row files, talking to a data source, or rendering.
/// Variants that wrap errors from external crates use `#[from]` for automatic
/// conversion.
///
/// # Examples
///
/// ```
/// use datagrid::GridError;
///
/// fn validate_page_size(size: usize) -> Result<(), GridError> {
///     if size == 0 {
///         return Err(GridError::Config("page_size must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum GridError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while
    /// reading row files, configuration or theme files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed or did not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed or the theme name is unknown.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The data source rejected a fetch.
    ///
    /// The message is surfaced verbatim in the table's error state.
    #[error("{0}")]
    Fetch(String),

    /// A column definition is invalid (duplicate id, unknown id referenced
    /// by the caller).
    #[error("Column error: {0}")]
    Column(String),
}

/// A specialized `Result` type for datagrid operations.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_display_verbatim() {
        let err = GridError::Fetch("503 Service Unavailable".to_string());
        assert_eq!(err.to_string(), "503 Service Unavailable");
    }

    #[test]
    fn io_errors_convert() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }
        assert!(matches!(read(), Err(GridError::Io(_))));
    }
}
