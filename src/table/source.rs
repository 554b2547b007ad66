//! The server-mode data source seam.
//!
//! A [`DataSource`] receives the table's current query as [`FetchParams`] and
//! resolves to a [`FetchResult`]. Page-mode sources populate `total`;
//! cursor-mode sources populate `cursor` and `has_more`.
//!
//! # Example
//!
//! ```rust
//! use datagrid::domain::GridError;
//! use datagrid::table::{DataSource, FetchParams, FetchResult};
//! use futures_util::FutureExt;
//! use serde_json::{json, Value};
//!
//! let source = |params: FetchParams| {
//!     let rows = vec![json!({"page": params.page})];
//!     async move { Ok::<_, GridError>(FetchResult::page(rows, 1)) }.boxed()
//! };
//! # fn assert_source<S: DataSource<Value>>(_: &S) {}
//! # assert_source(&source);
//! ```

use crate::domain::Result;
use crate::table::filter::FilterState;
use crate::table::sort::SortState;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Query handed to a data source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FetchParams {
    /// One-based page index (page mode only).
    pub page: Option<usize>,
    pub page_size: usize,
    /// Continuation token (cursor mode only; `None` for the first page).
    pub cursor: Option<String>,
    pub sort: SortState,
    pub filters: FilterState,
    /// Ids of the columns global search should cover, in table order. The
    /// table sends its visible columns; an empty list means every column.
    #[serde(default)]
    pub search_columns: Vec<String>,
}

/// One page of rows returned by a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult<T> {
    pub rows: Vec<T>,
    /// Total matching rows across all pages.
    pub total: Option<usize>,
    /// Token for the next page.
    pub cursor: Option<String>,
    pub has_more: Option<bool>,
}

impl<T> FetchResult<T> {
    /// A page-mode result.
    pub fn page(rows: Vec<T>, total: usize) -> Self {
        Self {
            rows,
            total: Some(total),
            cursor: None,
            has_more: None,
        }
    }

    /// A cursor-mode result.
    pub fn cursor(rows: Vec<T>, cursor: Option<String>, has_more: bool) -> Self {
        Self {
            rows,
            total: None,
            cursor,
            has_more: Some(has_more),
        }
    }
}

pub type FetchFuture<T> = BoxFuture<'static, Result<FetchResult<T>>>;

/// Asynchronous row provider for server-mode tables.
pub trait DataSource<T>: Send + Sync {
    /// Fetches the rows matching `params`.
    ///
    /// A rejected future surfaces its error message verbatim in the table.
    fn fetch(&self, params: FetchParams) -> FetchFuture<T>;
}

impl<T, F> DataSource<T> for F
where
    F: Fn(FetchParams) -> FetchFuture<T> + Send + Sync,
{
    fn fetch(&self, params: FetchParams) -> FetchFuture<T> {
        self(params)
    }
}
