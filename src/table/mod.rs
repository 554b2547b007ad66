//! Headless table engine: state, events and actions.
//!
//! This module owns everything a data table knows independent of how it is
//! drawn. It follows a unidirectional data flow:
//!
//! ```text
//! Interaction → Event → handle_event → State Mutation → Actions → Side Effects
//!                           ↑                                         ↓
//!                           └────────── Fetch outcomes ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`column`]: Declarative column definitions and accessors
//! - [`filter`]: Global search, typed column filters and their evaluator
//! - [`sort`]: Single-column sort state and stable client-side sorting
//! - [`pagination`]: Page-based and cursor-based pagination
//! - [`selection`]: Row selection for bulk actions
//! - [`view`]: Column visibility, density and full-screen toggles
//! - [`debounce`]: Trailing-edge debouncing of server-mode filter changes
//! - [`source`]: The asynchronous data source seam
//! - [`state`]: The table state container and view model computation
//! - [`actions`]: Side effects emitted by the event handler
//! - [`handler`]: The event handler
//! - [`controller`]: Executes actions against a data source and callbacks

pub mod actions;
pub mod column;
pub mod controller;
pub mod debounce;
pub mod filter;
pub mod handler;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod source;
pub mod state;
pub mod view;

pub use actions::{Action, ActionDef, FetchRequest};
pub use column::{ColumnDef, FieldAccess};
pub use controller::TableController;
pub use filter::{FilterKind, FilterSpec, FilterState, FilterValue, SearchMode};
pub use handler::{handle_event, ClickTarget, Event};
pub use pagination::{Pagination, PaginationMode};
pub use selection::{RowId, Selection};
pub use sort::{SortDirection, SortState};
pub use source::{DataSource, FetchFuture, FetchParams, FetchResult};
pub use state::{DataMode, TableOptions, TableState};
pub use view::{Density, ToolbarConfig, ViewOptions};
