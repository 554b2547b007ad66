//! In-memory data source.

use crate::source::query::run_query;
use crate::table::{ColumnDef, DataSource, FetchFuture, FetchParams, SearchMode};
use futures_util::FutureExt;
use std::sync::Arc;

/// A [`DataSource`] answering queries from rows held in memory.
///
/// Useful for driving a server-mode table without a backend, for example in
/// tests or demos. Each fetch filters, sorts and pages the full row set.
///
/// # Examples
///
/// ```rust
/// use datagrid::source::MemorySource;
/// use datagrid::table::{ColumnDef, TableController, TableOptions};
/// use serde_json::{json, Value};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let columns: Vec<ColumnDef<Value>> = vec![ColumnDef::keyed("name", "Name")];
/// let rows: Vec<Value> = (0..25).map(|i| json!({"name": i})).collect();
///
/// let source = MemorySource::new(rows, columns.clone());
/// let mut table = TableController::server(columns, source, TableOptions::default())?;
/// table.load().await?;
/// assert_eq!(table.state().rows().len(), 10);
/// assert_eq!(table.state().total(), 25);
/// # Ok::<(), datagrid::domain::GridError>(())
/// # }).unwrap();
/// ```
pub struct MemorySource<T> {
    rows: Arc<Vec<T>>,
    columns: Arc<Vec<ColumnDef<T>>>,
    search_mode: SearchMode,
}

impl<T> MemorySource<T> {
    pub fn new(rows: Vec<T>, columns: Vec<ColumnDef<T>>) -> Self {
        Self {
            rows: Arc::new(rows),
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
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> DataSource<T> for MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fetch(&self, params: FetchParams) -> FetchFuture<T> {
        let rows = Arc::clone(&self.rows);
        let columns = Arc::clone(&self.columns);
        let mode = self.search_mode;
        async move { run_query(&rows, &columns, &params, mode) }.boxed()
    }
}
