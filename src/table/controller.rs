//! Action execution around the table state machine.
//!
//! [`TableController`] owns a [`TableState`], the optional server-mode
//! [`DataSource`] and the caller's callbacks. [`TableController::dispatch`]
//! feeds an event through [`handle_event`] and executes the returned actions
//! until the queue drains: fetch outcomes are fed back as
//! `FetchSucceeded`/`FetchFailed` events, and row, bulk and filter actions are
//! delivered to the registered callbacks.
//!
//! ```text
//! Event → handle_event → Actions ─┬─ Fetch ─▶ DataSource ─▶ FetchSucceeded / FetchFailed ─┐
//!   ▲                             └─ callbacks                                           │
//!   └────────────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{ColumnDef, Event, TableController, TableOptions};
//! use serde_json::{json, Value};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let columns: Vec<ColumnDef<Value>> = vec![ColumnDef::keyed("name", "Name").sortable()];
//! let rows = vec![json!({"name": "Beta"}), json!({"name": "Alpha"})];
//!
//! let mut controller = TableController::client(columns, rows, TableOptions::default())?
//!     .on_row_click(|row: &Value, index| println!("clicked {index}: {row}"));
//! controller.dispatch(Event::HeaderClicked("name".into())).await?;
//! assert_eq!(controller.state().total(), 2);
//! # Ok::<(), datagrid::domain::GridError>(())
//! # }).unwrap();
//! ```

use crate::domain::Result;
use crate::table::actions::{Action, FetchRequest};
use crate::table::column::ColumnDef;
use crate::table::filter::FilterState;
use crate::table::handler::{handle_event, Event};
use crate::table::source::DataSource;
use crate::table::state::{DataMode, TableOptions, TableState};
use crate::ui::viewmodel::TableViewModel;
use std::collections::VecDeque;
use std::sync::Arc;

type FiltersCallback = Box<dyn FnMut(&FilterState) + Send>;
type RowClickCallback<T> = Box<dyn FnMut(&T, usize) + Send>;
type RowActionCallback<T> = Box<dyn FnMut(&str, &T) + Send>;
type BulkActionCallback<T> = Box<dyn FnMut(&str, &[&T]) + Send>;

/// Caller hooks invoked when the state machine emits interaction actions.
pub struct Callbacks<T> {
    on_filters_change: Option<FiltersCallback>,
    on_row_click: Option<RowClickCallback<T>>,
    on_row_action: Option<RowActionCallback<T>>,
    on_bulk_action: Option<BulkActionCallback<T>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_filters_change: None,
            on_row_click: None,
            on_row_action: None,
            on_bulk_action: None,
        }
    }
}

/// A table plus everything needed to execute its actions.
pub struct TableController<T> {
    state: TableState<T>,
    source: Option<Arc<dyn DataSource<T>>>,
    callbacks: Callbacks<T>,
}

impl<T: Send + 'static> TableController<T> {
    /// A client-mode table over in-memory rows.
    ///
    /// # Errors
    ///
    /// Propagates column and option validation errors from [`TableState::new`].
    pub fn client(columns: Vec<ColumnDef<T>>, rows: Vec<T>, options: TableOptions) -> Result<Self> {
        Ok(Self {
            state: TableState::new(columns, DataMode::Client(rows), options)?,
            source: None,
            callbacks: Callbacks::default(),
        })
    }

    /// A server-mode table fetching from `source`.
    ///
    /// Nothing is fetched until [`TableController::load`] is awaited.
    ///
    /// # Errors
    ///
    /// Propagates column and option validation errors from [`TableState::new`].
    pub fn server<S>(columns: Vec<ColumnDef<T>>, source: S, options: TableOptions) -> Result<Self>
    where
        S: DataSource<T> + 'static,
    {
        Ok(Self {
            state: TableState::new(columns, DataMode::Server, options)?,
            source: Some(Arc::new(source)),
            callbacks: Callbacks::default(),
        })
    }

    #[must_use]
    pub fn on_filters_change(mut self, callback: impl FnMut(&FilterState) + Send + 'static) -> Self {
        self.callbacks.on_filters_change = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_row_click(mut self, callback: impl FnMut(&T, usize) + Send + 'static) -> Self {
        self.callbacks.on_row_click = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_row_action(mut self, callback: impl FnMut(&str, &T) + Send + 'static) -> Self {
        self.callbacks.on_row_action = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_bulk_action(mut self, callback: impl FnMut(&str, &[&T]) + Send + 'static) -> Self {
        self.callbacks.on_bulk_action = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub const fn state(&self) -> &TableState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TableState<T> {
        &mut self.state
    }

    #[must_use]
    pub fn view(&self) -> TableViewModel {
        self.state.compute_viewmodel()
    }

    /// Performs the initial load: a fetch in server mode, a recompute in
    /// client mode.
    ///
    /// # Errors
    ///
    /// See [`TableController::dispatch`].
    pub async fn load(&mut self) -> Result<bool> {
        self.dispatch(Event::Reload).await
    }

    /// Processes an event and executes every resulting action.
    ///
    /// Fetches are awaited in order and their outcomes processed as events
    /// before `dispatch` returns. A rejected fetch does not fail `dispatch`;
    /// it is recorded in the table's error state.
    ///
    /// # Returns
    ///
    /// Whether any processed event changed the view.
    ///
    /// # Errors
    ///
    /// Returns errors from [`handle_event`].
    pub async fn dispatch(&mut self, event: Event<T>) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut changed = false;

        while let Some(event) = queue.pop_front() {
            let (event_changed, actions) = handle_event(&mut self.state, event)?;
            changed |= event_changed;

            for action in actions {
                if let Some(follow_up) = self.execute(action).await {
                    queue.push_back(follow_up);
                }
            }
        }

        Ok(changed)
    }

    async fn execute(&mut self, action: Action) -> Option<Event<T>> {
        match action {
            Action::Fetch(request) => self.fetch(request).await,
            Action::FiltersChanged(filters) => {
                if let Some(callback) = self.callbacks.on_filters_change.as_mut() {
                    callback(&filters);
                }
                None
            }
            Action::RowClicked { row, index } => {
                if let (Some(callback), Some(data)) = (self.callbacks.on_row_click.as_mut(), self.state.row(row)) {
                    callback(data, index);
                }
                None
            }
            Action::RowAction { action, row } => {
                if let (Some(callback), Some(data)) = (self.callbacks.on_row_action.as_mut(), self.state.row(row)) {
                    callback(&action, data);
                }
                None
            }
            Action::BulkAction { action, rows } => {
                if let Some(callback) = self.callbacks.on_bulk_action.as_mut() {
                    let selected: Vec<&T> = rows.iter().filter_map(|id| self.state.row(*id)).collect();
                    callback(&action, &selected);
                }
                None
            }
        }
    }

    async fn fetch(&self, request: FetchRequest) -> Option<Event<T>> {
        let Some(source) = self.source.clone() else {
            tracing::debug!(seq = request.seq, "no data source configured; skipping fetch");
            return None;
        };

        let FetchRequest { seq, params } = request;
        Some(match source.fetch(params).await {
            Ok(result) => Event::FetchSucceeded { seq, result },
            Err(error) => Event::FetchFailed {
                seq,
                error: error.to_string(),
            },
        })
    }
}
