//! Side effects requested by the table state machine.
//!
//! [`handle_event`](crate::table::handle_event) mutates table state and
//! returns a `Vec<Action>`. The caller (usually a
//! [`TableController`](crate::table::TableController)) executes them in order:
//! issuing fetches against the data source and invoking user callbacks.
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{Action, RowId};
//!
//! let action = Action::RowClicked { row: RowId(0), index: 0 };
//! assert!(matches!(action, Action::RowClicked { .. }));
//! ```

use crate::table::filter::FilterState;
use crate::table::selection::RowId;
use crate::table::source::FetchParams;
use serde::{Deserialize, Serialize};

/// A named row or bulk action offered by the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub id: String,
    pub label: String,
}

impl ActionDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A fetch the state machine wants issued.
///
/// `seq` must be echoed back in the resulting
/// [`Event::FetchSucceeded`](crate::table::Event::FetchSucceeded) or
/// [`Event::FetchFailed`](crate::table::Event::FetchFailed); responses for
/// anything but the newest request are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub seq: u64,
    pub params: FetchParams,
}

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Query the data source (server mode only).
    Fetch(FetchRequest),

    /// The search string or a column filter changed.
    FiltersChanged(FilterState),

    /// A row body was clicked.
    RowClicked {
        row: RowId,
        /// Position of the row on the current page.
        index: usize,
    },

    /// A row action button was clicked. Never accompanied by `RowClicked`.
    RowAction { action: String, row: RowId },

    /// A bulk action was triggered with the live selection, in selection order.
    BulkAction { action: String, rows: Vec<RowId> },
}
