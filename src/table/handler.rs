//! Event handling and state transition logic.
//!
//! This module implements the table's state machine: [`handle_event`] applies
//! one [`Event`] to a [`TableState`] and returns whether the view changed plus
//! the [`Action`]s the caller must execute.
//!
//! # Event Types
//!
//! - **Sort**: `HeaderClicked`
//! - **Filters**: `SearchChanged`, `FilterChanged`, `FilterCleared`, `FiltersReset`
//! - **Pagination**: `NextPage`, `PreviousPage`, `GoToPage`, `PageSizeChanged`
//! - **Selection**: `RowToggled`, `AllVisibleToggled`, `SelectionCleared`
//! - **View**: `ColumnVisibilityToggled`, `DensityChanged`, `DensityCycled`,
//!   `FullScreenToggled`
//! - **Interaction**: `Clicked`, `BulkActionTriggered`
//! - **Data**: `Tick`, `Reload`, `DataReplaced`, `FetchSucceeded`, `FetchFailed`
//!
//! # Client vs. Server Mode
//!
//! In client mode every change is applied in memory immediately. In server
//! mode sort and page changes emit an [`Action::Fetch`] right away, while
//! filter changes restart a debounce window and the fetch is emitted by the
//! first `Tick` after the window elapses.
//!
//! # Stale Responses
//!
//! Every fetch carries a sequence number. A response whose number is not the
//! newest issued one is dropped, so a slow early response can never overwrite
//! a later one.
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{handle_event, ColumnDef, DataMode, Event, SortState, TableOptions, TableState};
//! use serde_json::{json, Value};
//!
//! let columns: Vec<ColumnDef<Value>> = vec![ColumnDef::keyed("name", "Name").sortable()];
//! let rows = vec![json!({"name": "b"}), json!({"name": "a"})];
//! let mut state = TableState::new(columns, DataMode::Client(rows), TableOptions::default())?;
//!
//! let (changed, _actions) = handle_event(&mut state, Event::HeaderClicked("name".into()))?;
//! assert!(changed);
//! assert_eq!(state.sort, SortState::Asc("name".into()));
//! # Ok::<(), datagrid::domain::GridError>(())
//! ```

use crate::domain::{GridError, Result};
use crate::table::actions::Action;
use crate::table::column::find_column;
use crate::table::filter::FilterValue;
use crate::table::pagination::Pagination;
use crate::table::selection::RowId;
use crate::table::source::FetchResult;
use crate::table::state::TableState;
use crate::table::view::Density;
use std::time::Instant;

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// The row body.
    Row,
    /// A row action button, by action id.
    Action(String),
}

/// Interactions and data notifications processed by [`handle_event`].
pub enum Event<T> {
    /// A column header was clicked.
    HeaderClicked(String),

    /// The global search string changed.
    SearchChanged(String),

    /// A column filter changed. An empty value removes the filter.
    FilterChanged { column: String, value: FilterValue },

    FilterCleared(String),

    /// Clears the search string and every column filter.
    FiltersReset,

    NextPage,
    PreviousPage,

    /// Jump to a one-based page (page mode).
    GoToPage(usize),

    PageSizeChanged(usize),

    RowToggled(RowId),

    /// Select every row on the current page, or clear if all are selected.
    AllVisibleToggled,

    SelectionCleared,

    ColumnVisibilityToggled(String),
    DensityChanged(Density),
    DensityCycled,
    FullScreenToggled,

    /// A click on the row at `index` of the current page.
    Clicked { index: usize, target: ClickTarget },

    BulkActionTriggered(String),

    /// Clock tick driving the server-mode filter debounce.
    Tick(Instant),

    /// Recompute (client) or refetch (server) with the current state.
    Reload,

    /// Replaces every row of a client-mode table.
    DataReplaced(Vec<T>),

    FetchSucceeded { seq: u64, result: FetchResult<T> },

    /// A fetch was rejected; `error` is shown verbatim.
    FetchFailed { seq: u64, error: String },
}

impl<T> Event<T> {
    /// Event name for tracing.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HeaderClicked(_) => "header_clicked",
            Self::SearchChanged(_) => "search_changed",
            Self::FilterChanged { .. } => "filter_changed",
            Self::FilterCleared(_) => "filter_cleared",
            Self::FiltersReset => "filters_reset",
            Self::NextPage => "next_page",
            Self::PreviousPage => "previous_page",
            Self::GoToPage(_) => "go_to_page",
            Self::PageSizeChanged(_) => "page_size_changed",
            Self::RowToggled(_) => "row_toggled",
            Self::AllVisibleToggled => "all_visible_toggled",
            Self::SelectionCleared => "selection_cleared",
            Self::ColumnVisibilityToggled(_) => "column_visibility_toggled",
            Self::DensityChanged(_) => "density_changed",
            Self::DensityCycled => "density_cycled",
            Self::FullScreenToggled => "full_screen_toggled",
            Self::Clicked { .. } => "clicked",
            Self::BulkActionTriggered(_) => "bulk_action_triggered",
            Self::Tick(_) => "tick",
            Self::Reload => "reload",
            Self::DataReplaced(_) => "data_replaced",
            Self::FetchSucceeded { .. } => "fetch_succeeded",
            Self::FetchFailed { .. } => "fetch_failed",
        }
    }
}

/// Processes an event, mutates table state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to table state
/// * `event` - Event to process
///
/// # Returns
///
/// `(changed, actions)`: whether the view model may have changed, and the
/// side effects to execute in order. Sort and filter no-ops return
/// `(false, [])`.
///
/// # Errors
///
/// Returns [`GridError::Config`] for a page size of zero or one that is not
/// among the configured options.
#[allow(clippy::too_many_lines)]
pub fn handle_event<T>(state: &mut TableState<T>, event: Event<T>) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event = event.name(), server = state.is_server()).entered();

    match event {
        Event::HeaderClicked(field) => {
            let sortable = find_column(state.columns(), &field).is_some_and(|c| c.sortable);
            if !sortable {
                tracing::debug!(field = %field, "ignoring click on a header that is not sortable");
                return Ok((false, vec![]));
            }

            state.sort = state.sort.toggled(&field);
            tracing::debug!(sort = ?state.sort, "sort changed");

            if matches!(state.pagination, Pagination::Cursor(_)) {
                state.pagination.reset();
            }
            Ok((true, refresh(state)))
        }

        Event::SearchChanged(query) => {
            let changed = state.filters.set_global(query);
            Ok(filters_changed(state, changed))
        }
        Event::FilterChanged { column, value } => {
            let changed = state.filters.set_column(column, value);
            Ok(filters_changed(state, changed))
        }
        Event::FilterCleared(column) => {
            let changed = state.filters.clear_column(&column);
            Ok(filters_changed(state, changed))
        }
        Event::FiltersReset => {
            let changed = state.filters.reset();
            Ok(filters_changed(state, changed))
        }

        Event::NextPage => {
            let total = state.total;
            let moved = state.pagination.next(total);
            Ok(page_moved(state, moved))
        }
        Event::PreviousPage => {
            let moved = state.pagination.prev();
            Ok(page_moved(state, moved))
        }
        Event::GoToPage(page) => {
            let total = state.total;
            let moved = state.pagination.go_to(page, total);
            Ok(page_moved(state, moved))
        }
        Event::PageSizeChanged(size) => {
            if size == 0 {
                return Err(GridError::Config("page size must be positive".to_string()));
            }
            if !state.page_size_options.contains(&size) {
                return Err(GridError::Config(format!(
                    "page size {size} is not one of {:?}",
                    state.page_size_options
                )));
            }
            if state.pagination.page_size() == size {
                return Ok((false, vec![]));
            }

            state.pagination.set_page_size(size);
            Ok((true, refresh(state)))
        }

        Event::RowToggled(row) => {
            if !state.selection_enabled || state.row(row).is_none() {
                return Ok((false, vec![]));
            }
            let selected = state.selection.toggle(row);
            tracing::debug!(row = row.0, selected, "row selection toggled");
            Ok((true, vec![]))
        }
        Event::AllVisibleToggled => {
            if !state.selection_enabled {
                return Ok((false, vec![]));
            }
            let visible = state.page_row_ids().to_vec();
            let selected = state.selection.select_all_visible(&visible);
            tracing::debug!(visible = visible.len(), selected, "select all visible toggled");
            Ok((true, vec![]))
        }
        Event::SelectionCleared => {
            let changed = !state.selection.is_empty();
            state.selection.clear();
            Ok((changed, vec![]))
        }

        Event::ColumnVisibilityToggled(column) => {
            if find_column(state.columns(), &column).is_none() {
                return Ok((false, vec![]));
            }
            state.view.toggle_column(&column);
            // Global search only covers visible columns.
            if !state.filters.global.trim().is_empty() {
                state.apply_filters();
            }
            Ok((true, vec![]))
        }
        Event::DensityChanged(density) => {
            let changed = state.view.density != density;
            state.view.density = density;
            Ok((changed, vec![]))
        }
        Event::DensityCycled => {
            state.view.density = state.view.density.next();
            Ok((true, vec![]))
        }
        Event::FullScreenToggled => {
            state.view.full_screen = !state.view.full_screen;
            Ok((true, vec![]))
        }

        Event::Clicked { index, target } => {
            let Some(row) = state.page_row_ids().get(index).copied() else {
                tracing::debug!(index, "click outside the current page");
                return Ok((false, vec![]));
            };

            let action = match target {
                ClickTarget::Row => Action::RowClicked { row, index },
                ClickTarget::Action(action) => {
                    if !state.row_actions.iter().any(|a| a.id == action) {
                        tracing::debug!(action = %action, "unknown row action");
                        return Ok((false, vec![]));
                    }
                    Action::RowAction { action, row }
                }
            };
            Ok((false, vec![action]))
        }
        Event::BulkActionTriggered(action) => {
            if state.selection.is_empty() || !state.bulk_actions.iter().any(|a| a.id == action) {
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::BulkAction {
                    action,
                    rows: state.selection.rows().to_vec(),
                }],
            ))
        }

        Event::Tick(now) => {
            if state.is_server() && state.debouncer.fire_if_due(now) {
                return Ok((true, vec![Action::Fetch(state.begin_fetch())]));
            }
            Ok((false, vec![]))
        }
        Event::Reload => Ok((true, refresh(state))),
        Event::DataReplaced(rows) => {
            if state.is_server() {
                tracing::debug!("ignoring replaced data on a server-mode table");
                return Ok((false, vec![]));
            }
            state.replace_rows(rows);
            state.apply_filters();
            Ok((true, vec![]))
        }

        Event::FetchSucceeded { seq, result } => {
            if seq != state.fetch_seq {
                tracing::debug!(seq, latest = state.fetch_seq, "dropping stale fetch response");
                return Ok((false, vec![]));
            }
            Ok(fetch_succeeded(state, result))
        }
        Event::FetchFailed { seq, error } => {
            if seq != state.fetch_seq {
                tracing::debug!(seq, latest = state.fetch_seq, "dropping stale fetch failure");
                return Ok((false, vec![]));
            }
            tracing::debug!(seq, error = %error, "fetch failed");
            state.loading = false;
            state.error = Some(error);
            Ok((true, vec![]))
        }
    }
}

/// Recomputes in client mode or issues a fetch in server mode.
fn refresh<T>(state: &mut TableState<T>) -> Vec<Action> {
    if state.is_server() {
        vec![Action::Fetch(state.begin_fetch())]
    } else {
        state.apply_filters();
        vec![]
    }
}

/// Common tail of every filter event: back to page one, then recompute
/// (client) or restart the debounce window (server).
fn filters_changed<T>(state: &mut TableState<T>, changed: bool) -> (bool, Vec<Action>) {
    if !changed {
        return (false, vec![]);
    }

    state.pagination.reset();
    if state.is_server() {
        state.debouncer.schedule(Instant::now());
    } else {
        state.apply_filters();
    }

    tracing::debug!(active_filters = state.filters.active_count(), "filters changed");
    (true, vec![Action::FiltersChanged(state.filters.clone())])
}

fn page_moved<T>(state: &mut TableState<T>, moved: bool) -> (bool, Vec<Action>) {
    if !moved {
        return (false, vec![]);
    }
    tracing::debug!(page = state.pagination.page(), "page changed");
    (true, refresh(state))
}

fn fetch_succeeded<T>(state: &mut TableState<T>, result: FetchResult<T>) -> (bool, Vec<Action>) {
    let FetchResult {
        rows,
        total,
        cursor,
        has_more,
    } = result;

    let offset = match &state.pagination {
        Pagination::Page(p) => p.offset(),
        Pagination::Cursor(_) => 0,
    };

    state.total = total.unwrap_or(offset + rows.len());
    state.pagination.record_response(cursor, has_more);
    state.loading = false;
    state.error = None;
    state.replace_rows(rows);
    state.apply_filters();

    tracing::debug!(seq = state.fetch_seq, rows = state.rows().len(), total = state.total, "fetch settled");

    // The total shrank below the current page; fetch the last page instead.
    if state.pagination.clamp(state.total) {
        return (true, vec![Action::Fetch(state.begin_fetch())]);
    }
    (true, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ActionDef, ColumnDef, DataMode, FetchParams, FilterSpec, SortState, TableOptions};
    use crate::ui::viewmodel::BodyState;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn columns() -> Vec<ColumnDef<Value>> {
        vec![
            ColumnDef::keyed("name", "Name").sortable(),
            ColumnDef::keyed("status", "Status").filter(FilterSpec::select(["Open", "Closed"])),
        ]
    }

    fn client(count: usize) -> TableState<Value> {
        let rows = (0..count)
            .map(|i| json!({"name": format!("row-{i:02}"), "status": if i % 2 == 0 { "Open" } else { "Closed" }}))
            .collect();
        let options = TableOptions {
            row_actions: vec![ActionDef::new("edit", "Edit")],
            bulk_actions: vec![ActionDef::new("delete", "Delete")],
            ..TableOptions::default()
        };
        TableState::new(columns(), DataMode::Client(rows), options).unwrap()
    }

    fn server() -> TableState<Value> {
        TableState::new(columns(), DataMode::Server, TableOptions::default()).unwrap()
    }

    fn fetch_params(actions: &[Action]) -> (u64, FetchParams) {
        match actions {
            [Action::Fetch(request)] => (request.seq, request.params.clone()),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    #[test]
    fn three_header_clicks_cycle_sort() {
        let mut state = client(3);
        for expected in [
            SortState::Asc("name".into()),
            SortState::Desc("name".into()),
            SortState::Asc("name".into()),
        ] {
            handle_event(&mut state, Event::HeaderClicked("name".into())).unwrap();
            assert_eq!(state.sort, expected);
        }
    }

    #[test]
    fn clicking_unsortable_header_is_a_noop() {
        let mut state = client(3);
        let (changed, actions) = handle_event(&mut state, Event::HeaderClicked("status".into())).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state.sort, SortState::Unsorted);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = client(30);
        handle_event(&mut state, Event::GoToPage(3)).unwrap();
        assert_eq!(state.pagination.page(), 3);

        let (_, actions) = handle_event(
            &mut state,
            Event::FilterChanged {
                column: "status".into(),
                value: FilterValue::text("Open"),
            },
        )
        .unwrap();
        assert_eq!(state.pagination.page(), 1);
        assert_eq!(state.total(), 15);
        assert!(matches!(actions.as_slice(), [Action::FiltersChanged(_)]));
    }

    #[test]
    fn unchanged_search_emits_nothing() {
        let mut state = client(3);
        let (changed, actions) = handle_event(&mut state, Event::SearchChanged(String::new())).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());
    }

    #[test]
    fn page_size_must_be_a_configured_option() {
        let mut state = client(30);
        assert!(matches!(
            handle_event(&mut state, Event::PageSizeChanged(0)),
            Err(GridError::Config(_))
        ));
        assert!(matches!(
            handle_event(&mut state, Event::PageSizeChanged(7)),
            Err(GridError::Config(_))
        ));

        handle_event(&mut state, Event::NextPage).unwrap();
        handle_event(&mut state, Event::PageSizeChanged(25)).unwrap();
        assert_eq!(state.pagination.page(), 1);
        assert_eq!(state.page_row_ids().len(), 25);
    }

    #[test]
    fn row_action_click_never_emits_row_click() {
        let mut state = client(3);
        let (_, actions) = handle_event(
            &mut state,
            Event::Clicked {
                index: 1,
                target: ClickTarget::Action("edit".into()),
            },
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::RowAction {
                action: "edit".into(),
                row: RowId(1)
            }]
        );

        let (_, actions) = handle_event(
            &mut state,
            Event::Clicked {
                index: 1,
                target: ClickTarget::Row,
            },
        )
        .unwrap();
        assert_eq!(actions, vec![Action::RowClicked { row: RowId(1), index: 1 }]);
    }

    #[test]
    fn bulk_action_receives_selection_in_order() {
        let mut state = client(5);
        assert!(handle_event(&mut state, Event::BulkActionTriggered("delete".into()))
            .unwrap()
            .1
            .is_empty());

        handle_event(&mut state, Event::RowToggled(RowId(3))).unwrap();
        handle_event(&mut state, Event::RowToggled(RowId(1))).unwrap();
        let (_, actions) = handle_event(&mut state, Event::BulkActionTriggered("delete".into())).unwrap();
        assert_eq!(
            actions,
            vec![Action::BulkAction {
                action: "delete".into(),
                rows: vec![RowId(3), RowId(1)]
            }]
        );
    }

    #[test]
    fn select_all_visible_twice_clears() {
        let mut state = client(25);
        handle_event(&mut state, Event::AllVisibleToggled).unwrap();
        assert_eq!(state.selection.len(), 10);
        handle_event(&mut state, Event::AllVisibleToggled).unwrap();
        assert!(state.selection.is_empty());
    }

    #[test]
    fn server_filter_changes_are_debounced() {
        let mut state = server();
        let (seq, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);
        handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq,
                result: FetchResult::page(vec![json!({"name": "a"})], 1),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, Event::SearchChanged("a".into())).unwrap();
        assert!(matches!(actions.as_slice(), [Action::FiltersChanged(_)]));
        assert!(state.fetch_pending());

        let (_, actions) = handle_event(&mut state, Event::Tick(Instant::now())).unwrap();
        assert!(actions.is_empty());

        let later = Instant::now() + Duration::from_millis(400);
        let (_, params) = fetch_params(&handle_event(&mut state, Event::Tick(later)).unwrap().1);
        assert_eq!(params.filters.global, "a");
        assert_eq!(params.page, Some(1));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut state = server();
        let (first, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);
        let (second, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);

        let (changed, _) = handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq: first,
                result: FetchResult::page(vec![json!({"name": "old"})], 1),
            },
        )
        .unwrap();
        assert!(!changed);
        assert!(state.rows().is_empty());
        assert!(state.is_loading());

        handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq: second,
                result: FetchResult::page(vec![json!({"name": "new"})], 1),
            },
        )
        .unwrap();
        assert_eq!(state.rows()[0]["name"], "new");
        assert!(!state.is_loading());
    }

    #[test]
    fn failure_keeps_last_good_rows() {
        let mut state = server();
        let (seq, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);
        handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq,
                result: FetchResult::page(vec![json!({"name": "kept"})], 1),
            },
        )
        .unwrap();

        let (seq, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);
        handle_event(
            &mut state,
            Event::FetchFailed {
                seq,
                error: "backend unavailable".into(),
            },
        )
        .unwrap();

        let vm = state.compute_viewmodel();
        assert_eq!(vm.error_banner.as_deref(), Some("backend unavailable"));
        assert!(matches!(vm.body, BodyState::Rows(ref rows) if rows[0].cells[0].text == "kept"));
    }

    #[test]
    fn first_load_failure_shows_error_body() {
        let mut state = server();
        let (seq, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);
        assert!(matches!(state.compute_viewmodel().body, BodyState::Loading));

        handle_event(
            &mut state,
            Event::FetchFailed {
                seq,
                error: "boom".into(),
            },
        )
        .unwrap();
        assert_eq!(
            state.compute_viewmodel().body,
            BodyState::Error {
                message: "boom".into()
            }
        );
    }

    #[test]
    fn replacing_client_data_clears_selection() {
        let mut state = client(5);
        handle_event(&mut state, Event::AllVisibleToggled).unwrap();
        assert_eq!(state.selection.len(), 5);

        let rows = vec![json!({"name": "fresh", "status": "Open"})];
        let (changed, actions) = handle_event(&mut state, Event::DataReplaced(rows)).unwrap();
        assert!(changed);
        assert!(actions.is_empty());
        assert!(state.selection.is_empty());
        assert_eq!(state.total(), 1);
    }

    #[test]
    fn shrinking_total_refetches_the_last_page() {
        let mut state = server();
        let (seq, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);
        handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq,
                result: FetchResult::page(vec![json!({"name": "a"})], 30),
            },
        )
        .unwrap();

        let (seq, params) = fetch_params(&handle_event(&mut state, Event::GoToPage(3)).unwrap().1);
        assert_eq!(params.page, Some(3));

        let (changed, actions) = handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq,
                result: FetchResult::page(vec![], 12),
            },
        )
        .unwrap();
        assert!(changed);
        assert_eq!(state.pagination.page(), 2);

        let (refetch_seq, params) = fetch_params(&actions);
        assert!(refetch_seq > seq);
        assert_eq!(params.page, Some(2));
        assert!(state.is_loading());
    }

    #[test]
    fn successful_fetch_clears_selection() {
        let mut state = server();
        let (seq, _) = fetch_params(&handle_event(&mut state, Event::Reload).unwrap().1);
        handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq,
                result: FetchResult::page(vec![json!({"name": "a"}), json!({"name": "b"})], 30),
            },
        )
        .unwrap();
        handle_event(&mut state, Event::RowToggled(RowId(0))).unwrap();
        assert_eq!(state.selection.len(), 1);

        let (seq, params) = fetch_params(&handle_event(&mut state, Event::NextPage).unwrap().1);
        assert_eq!(params.page, Some(2));
        handle_event(
            &mut state,
            Event::FetchSucceeded {
                seq,
                result: FetchResult::page(vec![json!({"name": "c"})], 30),
            },
        )
        .unwrap();
        assert!(state.selection.is_empty());
    }
}
