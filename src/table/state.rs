//! Table state management and view model computation.
//!
//! This module defines [`TableState`], the single source of truth for one
//! table: its columns, the loaded rows, and all interactive state (filters,
//! sort, pagination, selection, view toggles, loading and error status).
//!
//! # Architecture
//!
//! `TableState` separates core data (columns, loaded rows) from derived state
//! (the filtered and sorted row order). Derived state is recomputed by
//! [`TableState::apply_filters`] after every mutation, and view models are
//! computed on demand from state snapshots.
//!
//! # Data Modes
//!
//! - **Client**: the caller hands over every row up front. Filtering, sorting
//!   and pagination happen in memory.
//! - **Server**: rows arrive one page at a time from a
//!   [`DataSource`](crate::table::DataSource). The loaded rows are shown as
//!   they are; filters, sort and paging are forwarded as [`FetchParams`].
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{ColumnDef, DataMode, TableOptions, TableState};
//! use serde_json::{json, Value};
//!
//! let columns: Vec<ColumnDef<Value>> = vec![
//!     ColumnDef::keyed("name", "Name").sortable(),
//!     ColumnDef::keyed("status", "Status").filterable(),
//! ];
//! let rows = vec![
//!     json!({"name": "Alpha", "status": "Open"}),
//!     json!({"name": "Beta", "status": "Closed"}),
//! ];
//!
//! let mut state = TableState::new(columns, DataMode::Client(rows), TableOptions::default())?;
//! state.filters.set_global("beta");
//! state.apply_filters();
//! assert_eq!(state.total(), 1);
//! # Ok::<(), datagrid::domain::GridError>(())
//! ```

use crate::domain::{GridError, Result};
use crate::table::actions::{ActionDef, FetchRequest};
use crate::table::column::{find_column, validate_columns, ColumnDef};
use crate::table::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::table::filter::{highlight_ranges, CompiledFilters, FilterState, SearchMode};
use crate::table::pagination::{Pagination, PaginationMode};
use crate::table::selection::{RowId, Selection};
use crate::table::sort::{sort_rows, SortState};
use crate::table::source::FetchParams;
use crate::table::view::{ToolbarConfig, ViewOptions};
use crate::ui::viewmodel::{
    BodyState, CellView, ColumnToggle, EmptyState, FooterInfo, HeaderCell, HeaderInfo, PaginationView,
    RowView, SearchBarInfo, SelectionSummary, TableViewModel, ToolbarInfo,
};
use crate::Config;
use std::time::Duration;

/// Where a table's rows come from.
pub enum DataMode<T> {
    /// Every row, filtered and paged in memory.
    Client(Vec<T>),
    /// Rows fetched page by page from a data source.
    Server,
}

/// Construction-time options of a table.
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub title: String,
    pub pagination: PaginationMode,
    pub page_size: usize,
    /// Page sizes the footer offers. The initial page size is always included.
    pub page_size_options: Vec<usize>,
    pub initial_filters: FilterState,
    pub initial_sort: SortState,
    pub toolbar: ToolbarConfig,
    pub selection_enabled: bool,
    pub row_actions: Vec<ActionDef>,
    pub bulk_actions: Vec<ActionDef>,
    /// Column whose value labels rows in the view model.
    pub row_key: Option<String>,
    pub search_mode: SearchMode,
    /// Quiet period before a server-mode filter change is fetched.
    pub debounce: Duration,
    /// Body text when the table holds no rows at all.
    pub empty_message: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: "Rows".to_string(),
            pagination: PaginationMode::Page,
            page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            initial_filters: FilterState::default(),
            initial_sort: SortState::Unsorted,
            toolbar: ToolbarConfig::default(),
            selection_enabled: true,
            row_actions: vec![],
            bulk_actions: vec![],
            row_key: None,
            search_mode: SearchMode::Substring,
            debounce: DEFAULT_DEBOUNCE,
            empty_message: "No rows".to_string(),
        }
    }
}

impl TableOptions {
    /// Options seeded from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.title.clone(),
            pagination: config.pagination,
            page_size: config.page_size,
            page_size_options: config.page_size_options.clone(),
            search_mode: config.search_mode,
            debounce: Duration::from_millis(config.debounce_ms),
            ..Self::default()
        }
    }
}

/// State of one table.
///
/// Holds the columns, the loaded rows and every piece of interactive state.
/// Mutated by [`handle_event`](crate::table::handle_event); view models are
/// computed from it with [`TableState::compute_viewmodel`].
pub struct TableState<T> {
    columns: Vec<ColumnDef<T>>,

    /// Client mode: every row. Server mode: the rows of the current page.
    rows: Vec<T>,

    server: bool,

    /// Current search string and column filters.
    pub filters: FilterState,

    pub sort: SortState,

    pub pagination: Pagination,

    pub(crate) page_size_options: Vec<usize>,

    pub selection: Selection,

    pub(crate) selection_enabled: bool,

    /// Column visibility, density and full-screen toggles.
    pub view: ViewOptions,

    pub(crate) toolbar: ToolbarConfig,
    pub(crate) row_actions: Vec<ActionDef>,
    pub(crate) bulk_actions: Vec<ActionDef>,
    row_key: Option<String>,
    pub(crate) search_mode: SearchMode,
    title: String,
    empty_message: String,

    /// A fetch is in flight.
    pub(crate) loading: bool,

    /// Message of the latest failed fetch, cleared by the next success.
    pub(crate) error: Option<String>,

    /// Rows matching the current filters across all pages.
    pub(crate) total: usize,

    /// Whether any rows have been loaded successfully.
    pub(crate) has_loaded: bool,

    /// Sequence number of the newest issued fetch.
    pub(crate) fetch_seq: u64,

    pub(crate) debouncer: Debouncer,

    /// Filtered and sorted row order (client mode) or load order (server mode).
    view_ids: Vec<RowId>,
}

impl<T> TableState<T> {
    /// Creates table state from column definitions and a data mode.
    ///
    /// # Errors
    ///
    /// - [`GridError::Column`] if column ids are empty or duplicated, or the
    ///   row key names an unknown column
    /// - [`GridError::Config`] if the page size is zero
    pub fn new(columns: Vec<ColumnDef<T>>, data: DataMode<T>, options: TableOptions) -> Result<Self> {
        validate_columns(&columns)?;

        if options.page_size == 0 {
            return Err(GridError::Config("page size must be positive".to_string()));
        }

        if let Some(key) = &options.row_key {
            if find_column(&columns, key).is_none() {
                return Err(GridError::Column(format!("row key column '{key}' is not defined")));
            }
        }

        let mut page_size_options: Vec<usize> =
            options.page_size_options.into_iter().filter(|size| *size > 0).collect();
        if !page_size_options.contains(&options.page_size) {
            page_size_options.push(options.page_size);
        }
        page_size_options.sort_unstable();
        page_size_options.dedup();

        let sort_allowed = options
            .initial_sort
            .field()
            .map_or(true, |field| find_column(&columns, field).is_some_and(|c| c.sortable));
        let sort = if sort_allowed {
            options.initial_sort
        } else {
            tracing::debug!(sort = ?options.initial_sort, "ignoring initial sort on a column that is not sortable");
            SortState::Unsorted
        };

        let view = ViewOptions {
            hidden: columns.iter().filter(|c| c.hidden).map(|c| c.id.clone()).collect(),
            ..ViewOptions::default()
        };

        let (rows, server) = match data {
            DataMode::Client(rows) => (rows, false),
            DataMode::Server => (vec![], true),
        };

        let mut state = Self {
            columns,
            rows,
            server,
            filters: options.initial_filters,
            sort,
            pagination: Pagination::new(options.pagination, options.page_size),
            page_size_options,
            selection: Selection::new(),
            selection_enabled: options.selection_enabled,
            view,
            toolbar: options.toolbar,
            row_actions: options.row_actions,
            bulk_actions: options.bulk_actions,
            row_key: options.row_key,
            search_mode: options.search_mode,
            title: options.title,
            empty_message: options.empty_message,
            loading: false,
            error: None,
            total: 0,
            has_loaded: !server,
            fetch_seq: 0,
            debouncer: Debouncer::new(options.debounce),
            view_ids: vec![],
        };
        state.apply_filters();
        Ok(state)
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    /// Loaded rows, in load order.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&T> {
        self.rows.get(id.0)
    }

    #[must_use]
    pub const fn is_server(&self) -> bool {
        self.server
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Rows matching the current filters across all pages.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    #[must_use]
    pub const fn fetch_seq(&self) -> u64 {
        self.fetch_seq
    }

    /// Whether a debounced filter change is waiting to be fetched.
    #[must_use]
    pub const fn fetch_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Visible columns in definition order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDef<T>> {
        self.columns.iter().filter(|c| self.view.is_visible(&c.id))
    }

    /// Filtered and sorted row order across all pages.
    #[must_use]
    pub fn filtered_row_ids(&self) -> &[RowId] {
        &self.view_ids
    }

    /// Rows shown on the current page.
    #[must_use]
    pub fn page_row_ids(&self) -> &[RowId] {
        if self.server {
            return &self.view_ids;
        }

        let (start, len) = match &self.pagination {
            Pagination::Page(p) => (p.offset(), p.page_size),
            Pagination::Cursor(c) => (client_cursor_offset(c.cursor.as_deref()), c.page_size),
        };
        let start = start.min(self.view_ids.len());
        let end = start.saturating_add(len).min(self.view_ids.len());
        &self.view_ids[start..end]
    }

    /// Selected rows in selection order.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.selection.rows().iter().filter_map(|id| self.row(*id)).collect()
    }

    /// Replaces the loaded rows and clears the selection.
    pub(crate) fn replace_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.selection.clear();
        self.has_loaded = true;
    }

    /// Recomputes the derived row order from filters and sort.
    ///
    /// In client mode this runs the filter evaluator over every row, sorts
    /// the matches, updates the total and pulls the page index back into
    /// range. In server mode the loaded rows are already filtered, sorted and
    /// paged by the source, so they are kept in load order.
    pub fn apply_filters(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filters",
            rows = self.rows.len(),
            server = self.server,
            active_filters = self.filters.active_count(),
            sort = ?self.sort
        )
        .entered();

        if self.server {
            self.view_ids = (0..self.rows.len()).map(RowId).collect();
            return;
        }

        let view = &self.view;
        let compiled = CompiledFilters::compile(&self.columns, |id| view.is_visible(id), &self.filters, self.search_mode);
        let mut ids = compiled.apply(&self.rows);

        if let (Some(field), Some(direction)) = (self.sort.field(), self.sort.direction()) {
            if let Some(column) = find_column(&self.columns, field) {
                sort_rows(&self.rows, &mut ids, column, direction);
            }
        }

        self.total = ids.len();
        self.view_ids = ids;
        self.pagination.clamp(self.total);
        self.sync_client_cursor();

        tracing::debug!(matched = self.total, "filters applied");
    }

    /// Client-mode cursor pagination uses the row offset as its token.
    fn sync_client_cursor(&mut self) {
        if let Pagination::Cursor(c) = &self.pagination {
            let next = client_cursor_offset(c.cursor.as_deref()) + c.page_size;
            let more = next < self.total;
            self.pagination.record_response(more.then(|| next.to_string()), Some(more));
        }
    }

    /// The query describing the current filters, sort and position.
    #[must_use]
    pub fn fetch_params(&self) -> FetchParams {
        let (page, cursor) = match &self.pagination {
            Pagination::Page(p) => (Some(p.page), None),
            Pagination::Cursor(c) => (None, c.cursor.clone()),
        };

        FetchParams {
            page,
            page_size: self.pagination.page_size(),
            cursor,
            sort: self.sort.clone(),
            filters: self.filters.clone(),
            search_columns: self.visible_columns().map(|c| c.id.clone()).collect(),
        }
    }

    /// Issues a new fetch: bumps the sequence number, marks the table as
    /// loading and cancels any pending debounced fetch.
    pub(crate) fn begin_fetch(&mut self) -> FetchRequest {
        self.fetch_seq += 1;
        self.loading = true;
        self.debouncer.cancel();

        let params = self.fetch_params();
        tracing::debug!(seq = self.fetch_seq, page = ?params.page, cursor = ?params.cursor, "fetch issued");

        FetchRequest {
            seq: self.fetch_seq,
            params,
        }
    }

    /// Computes a renderable view model from the current state.
    ///
    /// # Body State
    ///
    /// Exactly one body state is produced:
    ///
    /// 1. **Loading**: a fetch is in flight and no rows are available
    /// 2. **Error**: the latest fetch failed and no rows are available
    /// 3. **Empty**: no rows on the current page
    /// 4. **Rows**: otherwise
    ///
    /// While rows are available a failed fetch is reported through
    /// `error_banner` and an in-flight fetch through `refreshing`, so the
    /// last good rows stay visible.
    #[must_use]
    pub fn compute_viewmodel(&self) -> TableViewModel {
        let visible: Vec<&ColumnDef<T>> = self.visible_columns().collect();
        let page_ids = self.page_row_ids();
        let has_rows = !page_ids.is_empty();

        let body = if has_rows {
            BodyState::Rows(
                page_ids
                    .iter()
                    .enumerate()
                    .filter_map(|(index, id)| self.compute_row(&visible, *id, index))
                    .collect(),
            )
        } else if self.loading {
            BodyState::Loading
        } else if let Some(message) = &self.error {
            BodyState::Error {
                message: message.clone(),
            }
        } else if !self.has_loaded {
            BodyState::Loading
        } else {
            BodyState::Empty(self.compute_empty_state())
        };

        TableViewModel {
            header: HeaderInfo {
                title: self.title.clone(),
                total: self.total,
                active_filters: self.filters.active_count(),
            },
            search_bar: self.toolbar.search.then(|| SearchBarInfo {
                query: self.filters.global.clone(),
            }),
            toolbar: self.compute_toolbar(),
            columns: visible.iter().map(|c| self.compute_header_cell(c)).collect(),
            selectable: self.selection_enabled,
            body,
            error_banner: if has_rows { self.error.clone() } else { None },
            refreshing: has_rows && self.loading,
            footer: self.compute_footer(page_ids),
            density: self.view.density,
            full_screen: self.view.full_screen,
        }
    }

    fn compute_header_cell(&self, column: &ColumnDef<T>) -> HeaderCell {
        HeaderCell {
            id: column.id.clone(),
            label: column.header.clone(),
            sortable: column.sortable,
            sort: self.sort.direction_for(&column.id),
            width: column.width,
            filter: self.filters.column(&column.id).map(ToString::to_string),
        }
    }

    fn compute_row(&self, visible: &[&ColumnDef<T>], id: RowId, index: usize) -> Option<RowView> {
        let row = self.row(id)?;
        let query = self.filters.global.trim();

        let cells = visible
            .iter()
            .map(|column| {
                let text = column.render(row);
                let highlight_ranges = if query.is_empty() {
                    vec![]
                } else {
                    highlight_ranges(&text, query, self.search_mode)
                };
                CellView {
                    column: column.id.clone(),
                    text,
                    highlight_ranges,
                    custom: column.has_renderer(),
                }
            })
            .collect();

        let key = self
            .row_key
            .as_deref()
            .and_then(|key| find_column(&self.columns, key))
            .map(|column| column.value(row).to_string());

        Some(RowView {
            id,
            index,
            key,
            selected: self.selection.is_selected(id),
            cells,
            actions: self.row_actions.clone(),
        })
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.filters.is_empty() {
            EmptyState {
                message: self.empty_message.clone(),
                subtitle: String::new(),
            }
        } else {
            EmptyState {
                message: "No matching rows".to_string(),
                subtitle: "Clear the search or filters to see all rows".to_string(),
            }
        }
    }

    fn compute_toolbar(&self) -> ToolbarInfo {
        ToolbarInfo {
            column_toggles: self.toolbar.column_toggle.then(|| {
                self.columns
                    .iter()
                    .map(|c| ColumnToggle {
                        id: c.id.clone(),
                        label: c.header.clone(),
                        visible: self.view.is_visible(&c.id),
                    })
                    .collect()
            }),
            density: self.toolbar.density.then_some(self.view.density),
            full_screen: self.toolbar.full_screen.then_some(self.view.full_screen),
        }
    }

    fn compute_footer(&self, page_ids: &[RowId]) -> FooterInfo {
        let pagination = match &self.pagination {
            Pagination::Page(p) => PaginationView::Page {
                page: p.page,
                total_pages: p.total_pages(self.total),
                total: self.total,
                page_size: p.page_size,
                has_prev: self.pagination.has_prev(),
                has_next: self.pagination.has_next(self.total),
            },
            Pagination::Cursor(c) => PaginationView::Cursor {
                page: self.pagination.page(),
                page_size: c.page_size,
                has_prev: self.pagination.has_prev(),
                has_next: self.pagination.has_next(self.total),
            },
        };

        FooterInfo {
            pagination,
            page_size_options: self.page_size_options.clone(),
            selection: self.selection_enabled.then(|| SelectionSummary {
                selected: self.selection.len(),
                all_visible_selected: self.selection.all_selected(page_ids),
            }),
            bulk_actions: if self.selection.is_empty() {
                vec![]
            } else {
                self.bulk_actions.clone()
            },
        }
    }
}

fn client_cursor_offset(cursor: Option<&str>) -> usize {
    cursor.and_then(|c| c.parse().ok()).unwrap_or(0)
}
