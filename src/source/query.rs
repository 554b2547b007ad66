//! Server-side query execution shared by the bundled data sources.

use crate::domain::{GridError, Result};
use crate::table::filter::CompiledFilters;
use crate::table::sort::sort_rows;
use crate::table::column::find_column;
use crate::table::{ColumnDef, FetchParams, FetchResult, SearchMode};

/// Filters, sorts and slices `rows` the way a backend answering
/// [`FetchParams`] would.
///
/// Global search covers the columns named in `search_columns`, or every
/// column when the list is empty. Page requests are answered with
/// `total`; cursor requests (no `page`) treat the cursor as a row offset and
/// answer with the next offset and `has_more`.
///
/// # Errors
///
/// Returns [`GridError::Fetch`] for a cursor that is not a row offset.
pub fn run_query<T: Clone>(
    rows: &[T],
    columns: &[ColumnDef<T>],
    params: &FetchParams,
    mode: SearchMode,
) -> Result<FetchResult<T>> {
    let _span = tracing::debug_span!("run_query", rows = rows.len(), page = ?params.page, cursor = ?params.cursor).entered();

    let compiled = CompiledFilters::compile(
        columns,
        |id| params.search_columns.is_empty() || params.search_columns.iter().any(|c| c == id),
        &params.filters,
        mode,
    );
    let mut ids = compiled.apply(rows);

    if let (Some(field), Some(direction)) = (params.sort.field(), params.sort.direction()) {
        if let Some(column) = find_column(columns, field) {
            sort_rows(rows, &mut ids, column, direction);
        }
    }

    let total = ids.len();
    let page_size = params.page_size.max(1);

    let offset = match (params.page, params.cursor.as_deref()) {
        (Some(page), _) => page.saturating_sub(1) * page_size,
        (None, None) => 0,
        (None, Some(cursor)) => cursor
            .parse::<usize>()
            .map_err(|_| GridError::Fetch(format!("invalid cursor '{cursor}'")))?,
    };

    let page_rows: Vec<T> = ids
        .iter()
        .skip(offset)
        .take(page_size)
        .filter_map(|id| rows.get(id.0).cloned())
        .collect();

    tracing::debug!(matched = total, returned = page_rows.len(), offset, "query answered");

    if params.page.is_some() {
        return Ok(FetchResult::page(page_rows, total));
    }

    let next = offset + page_size;
    let has_more = next < total;
    Ok(FetchResult::cursor(page_rows, has_more.then(|| next.to_string()), has_more))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn columns() -> Vec<ColumnDef<Value>> {
        vec![ColumnDef::keyed("name", "Name"), ColumnDef::keyed("note", "Note")]
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({"name": "Alpha", "note": "urgent"}),
            json!({"name": "Urgent care", "note": ""}),
        ]
    }

    #[test]
    fn search_is_limited_to_requested_columns() {
        let mut params = FetchParams {
            page: Some(1),
            page_size: 10,
            ..FetchParams::default()
        };
        params.filters.set_global("urgent");

        let everywhere = run_query(&rows(), &columns(), &params, SearchMode::Substring).unwrap();
        assert_eq!(everywhere.total, Some(2));

        params.search_columns = vec!["name".to_string()];
        let names_only = run_query(&rows(), &columns(), &params, SearchMode::Substring).unwrap();
        assert_eq!(names_only.total, Some(1));
        assert_eq!(names_only.rows[0]["name"], "Urgent care");
    }
}
