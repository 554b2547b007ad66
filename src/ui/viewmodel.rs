//! View model types representing a renderable table.
//!
//! View models are computed from table state by
//! [`TableState::compute_viewmodel`](crate::table::TableState::compute_viewmodel)
//! and contain no business logic, only display-ready data: visible column
//! headers with sort indicators, pre-rendered cell text with search highlight
//! ranges, exactly one body state, and pagination and selection summaries.
//! Any front end can consume them; [`render`](crate::ui::render) turns one
//! into an ANSI frame.
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{ColumnDef, DataMode, TableOptions, TableState};
//! use datagrid::ui::viewmodel::BodyState;
//! use serde_json::{json, Value};
//!
//! let columns: Vec<ColumnDef<Value>> = vec![ColumnDef::keyed("name", "Name")];
//! let rows = vec![json!({"name": "Alpha"})];
//! let state = TableState::new(columns, DataMode::Client(rows), TableOptions::default())?;
//!
//! let vm = state.compute_viewmodel();
//! assert!(matches!(vm.body, BodyState::Rows(ref rows) if rows.len() == 1));
//! # Ok::<(), datagrid::domain::GridError>(())
//! ```

use crate::table::{ActionDef, Density, RowId, SortDirection};
use serde::Serialize;

/// Complete view model for one table frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableViewModel {
    pub header: HeaderInfo,

    /// Search bar, present when the toolbar offers search.
    pub search_bar: Option<SearchBarInfo>,

    pub toolbar: ToolbarInfo,

    /// Visible columns in definition order.
    pub columns: Vec<HeaderCell>,

    /// Whether rows carry a selection checkbox.
    pub selectable: bool,

    pub body: BodyState,

    /// Error of the latest fetch while earlier rows stay visible.
    pub error_banner: Option<String>,

    /// A fetch is in flight while earlier rows stay visible.
    pub refreshing: bool,

    pub footer: FooterInfo,

    pub density: Density,
    pub full_screen: bool,
}

/// Title bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    pub title: String,
    /// Rows matching the current filters.
    pub total: usize,
    /// Active constraints, counting the search string as one.
    pub active_filters: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Toolbar controls and their current values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarInfo {
    /// Column visibility toggles, present when the toolbar offers them.
    pub column_toggles: Option<Vec<ColumnToggle>>,
    pub density: Option<Density>,
    pub full_screen: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnToggle {
    pub id: String,
    pub label: String,
    pub visible: bool,
}

/// One visible column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    /// Present when the table is sorted by this column.
    pub sort: Option<SortDirection>,
    pub width: Option<usize>,
    /// Display form of the column's active filter.
    pub filter: Option<String>,
}

impl HeaderCell {
    /// Header label with the sort indicator appended when active.
    #[must_use]
    pub fn display_label(&self) -> String {
        match self.sort {
            Some(direction) => format!("{} {}", self.label, direction.indicator()),
            None => self.label.clone(),
        }
    }
}

/// The table body: exactly one of these is shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum BodyState {
    /// First load in progress, nothing to show yet.
    Loading,
    /// Fetch failed before any rows were loaded.
    Error { message: String },
    Empty(EmptyState),
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: RowId,
    /// Position on the current page.
    pub index: usize,
    /// Display key taken from the configured row-key column.
    pub key: Option<String>,
    pub selected: bool,
    /// Cells of the visible columns, aligned with `TableViewModel::columns`.
    pub cells: Vec<CellView>,
    pub actions: Vec<ActionDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub column: String,
    pub text: String,
    /// Character ranges of `text` matched by the search string.
    pub highlight_ranges: Vec<(usize, usize)>,
    /// Whether `text` came from a custom cell renderer.
    pub custom: bool,
}

/// Pagination bar, selection summary and bulk actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterInfo {
    pub pagination: PaginationView,
    pub page_size_options: Vec<usize>,
    pub selection: Option<SelectionSummary>,
    /// Offered only while rows are selected.
    pub bulk_actions: Vec<ActionDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum PaginationView {
    Page {
        page: usize,
        total_pages: usize,
        total: usize,
        page_size: usize,
        has_prev: bool,
        has_next: bool,
    },
    Cursor {
        page: usize,
        page_size: usize,
        has_prev: bool,
        has_next: bool,
    },
}

impl PaginationView {
    /// Short status text such as `Page 2 of 5 (48 rows)`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Page {
                page,
                total_pages,
                total,
                ..
            } => format!("Page {page} of {total_pages} ({total} rows)"),
            Self::Cursor { page, has_next, .. } => {
                if *has_next {
                    format!("Page {page}, more available")
                } else {
                    format!("Page {page}")
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub selected: usize,
    pub all_visible_selected: bool,
}
