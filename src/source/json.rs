//! JSON file data source.
//!
//! Reads rows from a JSON file on every fetch and answers the query itself,
//! acting as the backend of a server-mode table. Two file shapes are
//! accepted:
//!
//! ```json
//! [ {"name": "Alpha"}, {"name": "Beta"} ]
//! ```
//!
//! ```json
//! { "rows": [ {"name": "Alpha"}, {"name": "Beta"} ] }
//! ```

use crate::domain::{GridError, Result};
use crate::source::query::run_query;
use crate::table::{ColumnDef, DataSource, FetchFuture, FetchParams, SearchMode};
use futures_util::FutureExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads the rows of a JSON row file.
///
/// # Errors
///
/// - [`GridError::Io`] if the file cannot be read
/// - [`GridError::Json`] if it is not valid JSON
/// - [`GridError::Config`] if it is neither an array nor an object with a
///   `rows` array
pub fn load_rows(path: &Path) -> Result<Vec<Value>> {
    tracing::debug!(path = %path.display(), "loading rows");

    let contents = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;

    match document {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut object) => match object.remove("rows") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => Err(GridError::Config(format!(
                "{}: expected a JSON array or an object with a \"rows\" array",
                path.display()
            ))),
        },
        _ => Err(GridError::Config(format!("{}: expected a JSON array of rows", path.display()))),
    }
}

/// A [`DataSource`] backed by a JSON row file.
///
/// The file is re-read on every fetch, so edits show up on the next reload.
/// Read and parse failures reject the fetch with the error message.
pub struct JsonFileSource {
    path: PathBuf,
    columns: Arc<Vec<ColumnDef<Value>>>,
    search_mode: SearchMode,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, columns: Vec<ColumnDef<Value>>) -> Self {
        Self {
            path: path.into(),
            columns: Arc::new(columns),
            search_mode: SearchMode::Substring,
        }
    }

    #[must_use]
    pub const fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource<Value> for JsonFileSource {
    fn fetch(&self, params: FetchParams) -> FetchFuture<Value> {
        let path = self.path.clone();
        let columns = Arc::clone(&self.columns);
        let mode = self.search_mode;

        async move {
            let rows = load_rows(&path)?;
            run_query(&rows, &columns, &params, mode)
        }
        .boxed()
    }
}
